//! Routing-table connectivity probe.
//!
//! Implements [`ConnectivityProbe`] by "connecting" an unbound UDP socket to
//! a public address.  UDP connect sends nothing; it only asks the kernel
//! which local address the route would use.  No route means no address.

use core::fmt::Write as _;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use log::debug;

use crate::app::ports::{Address, ConnectivityProbe};

/// Well-known anycast resolver; never actually contacted.
const DEFAULT_TARGET: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

pub struct RouteProbe {
    target: SocketAddr,
}

impl Default for RouteProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteProbe {
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }

    pub fn with_target(target: SocketAddr) -> Self {
        Self { target }
    }

    fn local_ip(&self) -> std::io::Result<IpAddr> {
        let bind: SocketAddr = if self.target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind)?;
        socket.connect(self.target)?;
        Ok(socket.local_addr()?.ip())
    }
}

impl ConnectivityProbe for RouteProbe {
    fn current_address(&mut self) -> Address {
        let mut address = Address::new();
        match self.local_ip() {
            Ok(ip) if !ip.is_unspecified() && !ip.is_loopback() => {
                if write!(address, "{}", ip).is_err() {
                    address.clear();
                }
            }
            Ok(_) => {}
            Err(e) => debug!("NetProbe: no route to {} ({})", self.target, e),
        }
        address
    }
}
