/*
绑定4个 socket (ip1/ip2 x port1/port2)
一个mpsc 收集数据, 记录从哪个socket收到，源地址多少
处理完成后，按 CHANGE-REQUEST 选择用哪个socket发出
一个退出watch
*/

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::watch::Receiver as WatchReceiver;

use bytes::Bytes;
use log::{debug, error};
use stun_wire::util::print_bytes;

use crate::stun::{
    get_bad_response, get_minimal_response, get_response, parse_request, readable_trans_id,
    send_packet, send_response, validate_req,
};

// local addr, remote addr, recv data
type SocketInput = (SocketAddr, SocketAddr, Bytes);

#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub ips: [IpAddr; 2],
    pub ports: [u16; 2],
    // answer with a single MAPPED-ADDRESS
    pub minimal: bool,
}

pub struct Server {
    config: ServerConfig,
    signal_rx: WatchReceiver<bool>,
    queue_tx: Arc<Sender<SocketInput>>,
    queue_rx: Receiver<SocketInput>,
    sockets: HashMap<SocketAddr, Arc<UdpSocket>>,
}

impl Server {
    pub async fn new(config: ServerConfig, signal_rx: WatchReceiver<bool>) -> io::Result<Self> {
        let (queue_tx, queue_rx) = mpsc::channel::<SocketInput>(100);
        let map = init_socket(config.ips, config.ports).await?;

        let server = Self {
            config,
            signal_rx,
            queue_tx: Arc::new(queue_tx),
            queue_rx,
            sockets: map,
        };
        Ok(server)
    }

    pub async fn run(self) {
        let mut handles = vec![];

        for (addr, udp) in self.sockets.iter() {
            let socket = udp.clone();
            let local_addr = *addr;
            let sender = self.queue_tx.clone();
            let signal_rx = self.signal_rx.clone();

            let h = tokio::spawn(async move {
                recv_udp(socket, local_addr, sender, signal_rx).await;
            });
            handles.push(h);
        }

        let h = tokio::spawn(async move {
            process_udp(self.queue_rx, self.signal_rx, self.config, self.sockets).await;
        });
        handles.push(h);

        for v in handles {
            let _ = v.await;
        }
    }
}

//--------------------------------------------------

async fn init_socket(
    ips: [IpAddr; 2],
    ports: [u16; 2],
) -> io::Result<HashMap<SocketAddr, Arc<UdpSocket>>> {
    let mut sockets = HashMap::with_capacity(4);

    // bind, 互为 CA, CP
    for ip in ips {
        for port in ports {
            let pair = SocketAddr::new(ip, port);
            let socket = UdpSocket::bind(pair).await?;
            debug!("listening: {:?}", socket.local_addr());
            sockets.insert(pair, Arc::new(socket));
        }
    }

    Ok(sockets)
}

async fn recv_udp(
    socket: Arc<UdpSocket>,
    local_addr: SocketAddr,
    sender: Arc<Sender<SocketInput>>,
    mut signal_rx: WatchReceiver<bool>,
) {
    let mut buf = vec![0u8; 32 * 1024];

    loop {
        tokio::select! {
            Ok((len, remote_addr)) = socket.recv_from(&mut buf) => {
                let data = Bytes::copy_from_slice(&buf[..len]);
                debug!(
                    "{} <--- {}, len: {}\n{}",
                    local_addr,
                    remote_addr,
                    len,
                    print_bytes(&data, " ", 8)
                );

                if let Err(e) = sender.send((local_addr, remote_addr, data)).await {
                    error!("error, recv_udp, {}, {:?}", local_addr, e);
                    break;
                }
            },
            _ = signal_rx.changed() => {
                debug!("recv signal, recv_udp, {} will exit.", local_addr);
                break;
            }
        }
    }
}

async fn process_udp(
    mut receiver: Receiver<SocketInput>,
    mut signal_rx: WatchReceiver<bool>,
    config: ServerConfig,
    sockets: HashMap<SocketAddr, Arc<UdpSocket>>,
) {
    loop {
        tokio::select! {
            Some(input) = receiver.recv() => {
               process_one(input, config, &sockets).await;
            },
            _ = signal_rx.changed() => {
                debug!("recv signal, process_udp, will exit.");
                break;
            }
        }
    }
}

async fn process_one(
    input: SocketInput,
    config: ServerConfig,
    sockets: &HashMap<SocketAddr, Arc<UdpSocket>>,
) {
    // 解析请求数据包
    // 组装响应包
    // 找到对应的socket 发送

    let (local_addr, remote_addr, buf) = input;
    let request = match parse_request(&buf) {
        Ok(v) => v,
        Err(e) => {
            error!(
                "parse error, from remote:{}, local:{}, {}",
                remote_addr, local_addr, e
            );

            // header 都读不出来的包直接丢弃
            if let Some(trans_id) = readable_trans_id(&buf) {
                let (response, src_addr, dst_addr) =
                    get_bad_response(trans_id, local_addr, remote_addr);
                send_packet(&response, src_addr, dst_addr, sockets).await;
            }
            return;
        }
    };

    if let Some(e) = validate_req(&request) {
        error!(
            "validate error, from remote:{}, local:{}, {}",
            remote_addr, local_addr, e
        );

        let (response, src_addr, dst_addr) =
            get_bad_response(request.header.trans_id, local_addr, remote_addr);
        send_packet(&response, src_addr, dst_addr, sockets).await;

        return;
    }

    if config.minimal {
        if let Some(data) = get_minimal_response(&request, remote_addr) {
            send_response(&data, local_addr, remote_addr, sockets).await;
        }
        return;
    }

    let (response, src_addr, dst_addr) =
        get_response(&request, local_addr, remote_addr, config.ips, config.ports);
    send_packet(&response, src_addr, dst_addr, sockets).await;
}
