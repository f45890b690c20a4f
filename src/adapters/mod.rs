//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `access_point` | —                  | ESP-IDF WiFi soft AP     |
//! | `console`      | OperatorConsole    | UART stdin               |
//! | `hardware`     | SensorPort         | ESP32 ADC, I²C           |
//! |                | ActuatorPort       | Relay GPIO               |
//! | `http_client`  | HttpTransport      | ESP-IDF HTTP client      |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `time`         | ClockPort          | ESP32 system timer       |

pub mod access_point;
pub mod console;
pub mod hardware;
pub mod http_client;
pub mod log_sink;
pub mod time;
