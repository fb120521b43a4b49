// Listener setup
// Builds the TCP listener the accept loop runs on

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` bound to `addr`.
///
/// Built through socket2 so `SO_REUSEADDR` can be set before the bind:
/// restarting the server must not fail while the previous socket lingers
/// in TIME_WAIT.
pub fn bind_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;

    // Tokio requires the socket in non-blocking mode
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_on_an_ephemeral_port() {
        let listener = bind_listener(([127, 0, 0, 1], 0).into()).expect("binds");
        let addr = listener.local_addr().expect("has local addr");
        assert_ne!(addr.port(), 0);
    }
}
