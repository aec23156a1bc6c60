use crate::consts::MAX_PORT;
use std::net::{IpAddr, TcpListener};

/// the first port from `start_port` that `address` can bind, or `start_port` alone unless `search` is set
#[must_use]
pub fn find_available_port(search: bool, start_port: u16, address: IpAddr) -> Option<u16> {
    let available = |port: &u16| TcpListener::bind((address, *port)).is_ok();

    if search {
        (start_port..MAX_PORT).find(available)
    } else {
        Some(start_port).filter(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn occupied_port_is_skipped_when_searching() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let listener = TcpListener::bind((localhost, 0)).unwrap();
        let taken = listener.local_addr().unwrap().port();

        assert_eq!(find_available_port(false, taken, localhost), None);

        let found = find_available_port(true, taken, localhost).unwrap();
        assert!(found > taken);
    }
}
