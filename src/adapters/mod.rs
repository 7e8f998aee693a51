//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements        | Connects to                    |
//! |--------------|-------------------|--------------------------------|
//! | `gpio_board` | GpioPort          | `embedded-hal` pins            |
//! | `ini_config` | ConfigPort        | `/etc/COSmon.conf`             |
//! | `log_sink`   | EventSink         | `log` → tracing subscriber     |
//! | `net_probe`  | ConnectivityProbe | kernel routing table (UDP)     |
//! | `shell`      | CommandGateway    | `sh -c` → asterisk / poweroff  |
//! | `time`       | TimePort          | `std::thread::sleep`           |

pub mod gpio_board;
pub mod ini_config;
pub mod log_sink;
pub mod net_probe;
pub mod shell;
pub mod time;
