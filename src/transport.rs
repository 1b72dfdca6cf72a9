//! 데이터그램 전송 계층
//!
//! 전송자는 데이터그램 하나를 비동기로 보내고 결과를 돌려주는 기능만 가짐.
//! 실행 동안 한 소유자가 독점하며 마지막에 한 번만 닫힘.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::debug;

/// 데이터그램 전송 기능
#[async_trait]
pub trait Transport: Send {
    /// 데이터그램 하나 전송
    async fn send(&mut self, datagram: &[u8]) -> io::Result<()>;

    /// 전송자 해제
    async fn close(&mut self) -> io::Result<()>;
}

/// 빌려준 전송자도 그대로 사용
#[async_trait]
impl<T: Transport + ?Sized> Transport for &mut T {
    async fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        (**self).send(datagram).await
    }

    async fn close(&mut self) -> io::Result<()> {
        (**self).close().await
    }
}

/// 고정 목적지로 보내는 UDP 전송자
pub struct UdpTransport {
    socket: Option<UdpSocket>,
    destination: SocketAddr,
}

impl UdpTransport {
    /// 목적지와 같은 주소 체계의 임시 포트에 바인딩
    pub async fn bind(destination: SocketAddr) -> io::Result<Self> {
        let local = match destination.ip() {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let socket = UdpSocket::bind(local).await?;
        debug!("UDP transport bound to {} -> {}", socket.local_addr()?, destination);

        Ok(Self {
            socket: Some(socket),
            destination,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket()?.local_addr()
    }

    pub fn is_closed(&self) -> bool {
        self.socket.is_none()
    }

    fn socket(&self) -> io::Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "transport closed"))
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        let sent = self.socket()?.send_to(datagram, self.destination).await?;
        if sent != datagram.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram write: {sent}/{}", datagram.len()),
            ));
        }
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        match self.socket.take() {
            Some(socket) => {
                debug!("UDP transport to {} closed", self.destination);
                drop(socket);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "transport already closed",
            )),
        }
    }
}
