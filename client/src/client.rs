use log::{debug, info, warn};
use std::io;
use std::net::SocketAddr;
use stun_wire::attr_type::AttrType;
use stun_wire::attrs::change_request::ChangeRequestAction;
use stun_wire::constants::{MESSAGE_TYPE_BIND_RES, READ_TIMEOUT};
use stun_wire::util::print_bytes;
use stun_wire::{unmarshal_response, Request, Response};
use tokio::net::UdpSocket;
use tokio::time::{timeout, Duration};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("bad response: {0}")]
    Codec(#[from] stun_wire::Error),

    #[error("no response after {0:?}")]
    Timeout(Duration),

    #[error("transaction id mismatch")]
    TransIdMismatch,

    #[error("error response: {0} {1}")]
    ErrorResponse(u16, String),

    #[error("can't find attr: {0}")]
    MissingAttr(AttrType),
}

//--------------------------------------
#[derive(Debug, Clone, Default)]
pub struct ResponseAddressAttr {
    pub mapped_address: Option<SocketAddr>,
    pub xor_mapped_address: Option<SocketAddr>,
    pub source_address: Option<SocketAddr>,
    pub changed_address: Option<SocketAddr>,
}

impl ResponseAddressAttr {
    /// Prefers the xor form, old servers only send MAPPED-ADDRESS.
    pub fn reflexive_address(&self) -> Option<SocketAddr> {
        self.xor_mapped_address.or(self.mapped_address)
    }
}

//---------------------------------------
pub async fn run_binding(sock: &UdpSocket, server: SocketAddr, action: ChangeRequestAction) {
    match binding_once(sock, server, action, READ_TIMEOUT).await {
        Ok(v) => {
            info!("reflexive address: {:?}", v.reflexive_address());
            debug!("mapped_address: {:?}", v.mapped_address);
            debug!("xor_mapped_address: {:?}", v.xor_mapped_address);
            debug!("source_address: {:?}", v.source_address);
            debug!("changed_address: {:?}", v.changed_address);
        }
        Err(e) => {
            warn!("binding request to {} failed, {}", server, e);
        }
    }
}

pub async fn binding_once(
    sock: &UdpSocket,
    server: SocketAddr,
    action: ChangeRequestAction,
    wait: Duration,
) -> Result<ResponseAddressAttr, ClientError> {
    let req = Request::binding(action);
    let buf = req.marshal();
    debug!(
        "{:?} --> {}, len: {}\n{}",
        sock.local_addr(),
        server,
        buf.len(),
        print_bytes(&buf, " ", 8)
    );

    sock.send_to(&buf, server).await?;

    let mut recv_buf = vec![0u8; 32 * 1024];
    let (len, remote_addr) = timeout(wait, sock.recv_from(&mut recv_buf))
        .await
        .map_err(|_| ClientError::Timeout(wait))??;
    debug!(
        "{:?} <-- {}, len: {}\n{}",
        sock.local_addr(),
        remote_addr,
        len,
        print_bytes(&recv_buf[..len], " ", 8)
    );

    let response = unmarshal_response(&recv_buf[..len])?;
    check_response(&req, &response)?;

    find_response_attrs(&response)
}

pub fn check_response(req: &Request, response: &Response) -> Result<(), ClientError> {
    if response.header.trans_id != req.header.trans_id {
        return Err(ClientError::TransIdMismatch);
    }

    if let Some(e) = response.error_code() {
        return Err(ClientError::ErrorResponse(e.code, e.reason.clone()));
    }

    if response.header.msg_type != MESSAGE_TYPE_BIND_RES {
        warn!("unexpected msg_type: {:#06x}", response.header.msg_type);
    }

    Ok(())
}

pub fn find_response_attrs(response: &Response) -> Result<ResponseAddressAttr, ClientError> {
    let attrs = ResponseAddressAttr {
        mapped_address: response.mapped_address(),
        xor_mapped_address: response.xor_mapped_address(),
        source_address: response.address(AttrType::SOURCE_ADDRESS),
        changed_address: response.address(AttrType::CHANGED_ADDRESS),
    };

    if attrs.reflexive_address().is_none() {
        return Err(ClientError::MissingAttr(AttrType::XOR_MAPPED_ADDRESS));
    }

    Ok(attrs)
}
