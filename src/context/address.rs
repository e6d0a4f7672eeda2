//! Server address decoded from the embedded `sockaddr`

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use serde::Serialize;

use crate::layout::wire::{array_at, read_u16_be, read_u16_le, read_u32_be, read_u32_le};

/// `AF_INET` on every platform the producer runs on
pub const AF_INET: u16 = 2;
/// `AF_INET6` as written by a Windows producer
pub const AF_INET6_WINDOWS: u16 = 23;
/// `AF_INET6` on Linux
pub const AF_INET6_LINUX: u16 = 10;

/// Bytes reserved for the address (`sizeof(sockaddr_in6)`)
pub const SOCKADDR_CAPACITY: usize = 28;

/// Map server endpoint. Presentation only: never used for equality of
/// contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServerAddress {
    V4(SocketAddrV4),
    V6(SocketAddrV6),
    /// Unrecognised family, exposed numerically
    Unknown {
        family: u16,
        port: u16,
        address: [u8; 4],
    },
}

impl ServerAddress {
    /// Decode a `sockaddr_in` / `sockaddr_in6` record.
    ///
    /// The family is host order; the port and IPv4 address are network order.
    pub fn decode(sockaddr: &[u8]) -> Self {
        let family = read_u16_le(sockaddr, 0);
        let port = read_u16_be(sockaddr, 2);

        match family {
            AF_INET => {
                let ip = Ipv4Addr::from(array_at::<4>(sockaddr, 4));
                ServerAddress::V4(SocketAddrV4::new(ip, port))
            }
            AF_INET6_WINDOWS | AF_INET6_LINUX => {
                // sin6_flowinfo is declared __be32 like the port; only
                // sin6_scope_id is host order
                let flowinfo = read_u32_be(sockaddr, 4);
                let ip = Ipv6Addr::from(array_at::<16>(sockaddr, 8));
                let scope_id = read_u32_le(sockaddr, 24);
                ServerAddress::V6(SocketAddrV6::new(ip, port, flowinfo, scope_id))
            }
            _ => ServerAddress::Unknown {
                family,
                port,
                address: array_at::<4>(sockaddr, 4),
            },
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            ServerAddress::V4(addr) => addr.port(),
            ServerAddress::V6(addr) => addr.port(),
            ServerAddress::Unknown { port, .. } => *port,
        }
    }

    /// Address family tag normalised to the Windows values
    pub fn family(&self) -> u16 {
        match self {
            ServerAddress::V4(_) => AF_INET,
            ServerAddress::V6(_) => AF_INET6_WINDOWS,
            ServerAddress::Unknown { family, .. } => *family,
        }
    }

    /// Portable socket address, if the family was recognised
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            ServerAddress::V4(addr) => Some(SocketAddr::V4(*addr)),
            ServerAddress::V6(addr) => Some(SocketAddr::V6(*addr)),
            ServerAddress::Unknown { .. } => None,
        }
    }
}
