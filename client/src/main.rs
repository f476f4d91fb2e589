use std::net::{IpAddr, SocketAddr};
use std::process;

use clap::builder::ValueParser;
use clap::{Arg, Command};
use log::{debug, error};
use stun_client::client::run_binding;
use stun_wire::attrs::change_request::ChangeRequestAction;
use stun_wire::constants::DEFAULT_STUN_PORT;
use tokio::net::UdpSocket;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn parse_ip(s: &str) -> Result<IpAddr, String> {
    let ip = s.parse::<IpAddr>().map_err(|e| format!("{}", e))?;

    // 不能是 0.0.0.0
    match ip {
        IpAddr::V4(v) if v.is_unspecified() => Err("0.0.0.0 not allow".to_string()),
        IpAddr::V4(_) => Ok(ip),
        IpAddr::V6(_) => Err("ipv6 not support".to_string()),
    }
}

// 没写端口时用 3478
fn parse_addr(s: &str) -> Result<SocketAddr, String> {
    let addr = match s.parse::<SocketAddr>() {
        Ok(v) => v,
        Err(_) => SocketAddr::new(parse_ip(s)?, DEFAULT_STUN_PORT),
    };

    parse_ip(&addr.ip().to_string())?;
    Ok(addr)
}

fn parse_action(s: &str) -> Result<ChangeRequestAction, String> {
    match s {
        "none" => Ok(ChangeRequestAction::NoAction),
        "port" => Ok(ChangeRequestAction::ChangePort),
        "ip-port" => Ok(ChangeRequestAction::ChangeIpAndPort),
        v => Err(format!("unknown change action: {}, expect none|port|ip-port", v)),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let app = Command::new(APP_NAME)
        .version(APP_VERSION)
        .about("a stun client for probing nat")
        .arg(
            Arg::new("server")
                .long("server")
                .takes_value(true)
                .required(true)
                .help("server address, port defaults to 3478")
                .value_parser(ValueParser::new(parse_addr)),
        )
        .arg(
            Arg::new("local_ip")
                .long("local_ip")
                .takes_value(true)
                .required(true)
                .help("local ip")
                .value_parser(ValueParser::new(parse_ip)),
        )
        .arg(
            Arg::new("change")
                .long("change")
                .takes_value(true)
                .default_value("none")
                .help("CHANGE-REQUEST action: none|port|ip-port")
                .value_parser(ValueParser::new(parse_action)),
        )
        .get_matches();

    let server: SocketAddr = *app.get_one("server").expect("wrong server address");
    let local_ip: IpAddr = *app.get_one("local_ip").expect("wrong local ip");
    let action: ChangeRequestAction = *app.get_one("change").expect("wrong change action");

    let sock = match UdpSocket::bind(SocketAddr::new(local_ip, 0)).await {
        Ok(v) => v,
        Err(e) => {
            error!("can't bind {}, {:?}", local_ip, e);
            process::exit(1);
        }
    };

    debug!("local addr: {:?}", sock.local_addr());

    run_binding(&sock, server, action).await;
}
