//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC, GPIO          |
//! |                | DistancePort       | HC-SR04 trigger/echo     |
//! |                | ActuatorPort       | LEDs, buzzer, relay GPIO |
//! | `http`         | HttpPort           | esp-idf HTTP(S) client   |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `time`         | ClockPort          | ESP32 system timer       |
//! |                | MicrosClock        |                          |
//! | `wifi`         | ConnectivityPort   | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod time;
pub mod wifi;
