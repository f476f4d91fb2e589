use bytes::Bytes;
use log::{debug, error};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use stun_wire::attrs::address_attr::AddressAttr;
use stun_wire::attrs::errcode_attr::ErrcodeAttr;
use stun_wire::attrs::xor_address::XorAddress;
use stun_wire::attrs::Attribute;
use stun_wire::constants::*;
use stun_wire::header::{Header, TransId};
use stun_wire::packet::Packet;
use stun_wire::util::print_bytes;
use stun_wire::{build_synthetic_response, unmarshal_request, Request};
use tokio::net::UdpSocket;

pub fn parse_request(buf: &[u8]) -> Result<Request, String> {
    unmarshal_request(buf).map_err(|x| format!("{}", x))
}

// header 可读但 body 解析失败时，仍然用原 trans_id 回错误响应
pub fn readable_trans_id(buf: &[u8]) -> Option<TransId> {
    Header::unpack(buf).ok().map(|h| h.trans_id)
}

pub fn validate_req(req: &Request) -> Option<String> {
    if req.header.msg_type != MESSAGE_TYPE_BIND_REQ {
        return Some(format!("bad request msg_type: {:#06x}", req.header.msg_type));
    }

    if !req.header.has_magic_cookie() {
        return Some(format!("bad magic cookie: {:#010x}", req.header.magic_cookie));
    }

    None
}

// 返回响应包，响应包从哪个地址发出，发到哪个目的地址

pub fn get_response(
    req: &Request,
    local_addr: SocketAddr,
    remote_addr: SocketAddr,
    ips: [IpAddr; 2],
    ports: [u16; 2],
) -> (Packet, SocketAddr, SocketAddr) {
    let header = Header::new(MESSAGE_TYPE_BIND_RES, 0, req.header.trans_id);

    let da = local_addr.ip();
    let dp = local_addr.port();
    let (ca, cp) = get_ca_cp(da, dp, ips, ports);
    let other_addr = SocketAddr::new(ca, cp);

    let action = req.action();
    let src_ip = match action.change_ip() {
        true => ca,
        false => da,
    };
    let src_port = match action.change_port() {
        true => cp,
        false => dp,
    };
    let src_addr = SocketAddr::new(src_ip, src_port);

    let attrs = vec![
        Attribute::MappedAddress(AddressAttr::new(remote_addr)),
        Attribute::XorMappedAddress(XorAddress::new(remote_addr)),
        Attribute::ResponseOrigin(AddressAttr::new(src_addr)),
        Attribute::SourceAddress(AddressAttr::new(src_addr)),
        Attribute::OtherAddress(AddressAttr::new(other_addr)),
        Attribute::ChangedAddress(AddressAttr::new(other_addr)),
    ];

    (Packet::new(header, attrs), src_addr, remote_addr)
}

pub fn get_ca_cp(da: IpAddr, dp: u16, ips: [IpAddr; 2], ports: [u16; 2]) -> (IpAddr, u16) {
    let ca = match da == ips[0] {
        true => ips[1],
        false => ips[0],
    };

    let cp = match dp == ports[0] {
        true => ports[1],
        false => ports[0],
    };

    (ca, cp)
}

pub fn get_bad_response(
    trans_id: TransId,
    local_addr: SocketAddr,
    remote_addr: SocketAddr,
) -> (Packet, SocketAddr, SocketAddr) {
    let header = Header::new(MESSAGE_TYPE_BIND_ERR_RES, 0, trans_id);

    let mut res = Packet::new(header, vec![]);
    res.add_attr(Attribute::ErrorCode(ErrcodeAttr::new(
        ERROR_CODE_BAD_REQUEST,
        "Bad Request",
    )));

    (res, local_addr, remote_addr)
}

// rfc 3489 style answer: one MAPPED-ADDRESS, always from the receiving socket
pub fn get_minimal_response(req: &Request, remote_addr: SocketAddr) -> Option<Bytes> {
    match build_synthetic_response(&req.header.trans_id, remote_addr) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("no minimal response for {}, {}", remote_addr, e);
            None
        }
    }
}

pub async fn send_packet(
    res: &Packet,
    src_addr: SocketAddr,
    dst_addr: SocketAddr,
    sockets: &HashMap<SocketAddr, Arc<UdpSocket>>,
) {
    match res.pack() {
        Ok(data) => send_response(&data, src_addr, dst_addr, sockets).await,
        Err(e) => {
            error!("error, pack response to {}, {}", dst_addr, e);
        }
    }
}

pub async fn send_response(
    data: &[u8],
    src_addr: SocketAddr,
    dst_addr: SocketAddr,
    sockets: &HashMap<SocketAddr, Arc<UdpSocket>>,
) {
    let socket = match sockets.get(&src_addr) {
        None => {
            error!("can't find UdpSocket: {}", src_addr);
            return;
        }
        Some(v) => v.clone(),
    };

    match socket.send_to(data, dst_addr).await {
        Ok(v) => {
            debug!(
                "{} ---> {}\n{}",
                src_addr,
                dst_addr,
                print_bytes(data, " ", 8)
            );
            debug!("sent: {}", v);
        }
        Err(e) => {
            error!("error, {} ---> {}, {:?}", src_addr, dst_addr, e);
        }
    };
}
