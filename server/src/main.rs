// ./stun-server --ip1 1.2.3.4 --ip2 1.2.3.5 --port1 3478 --port2 3479

use log::{debug, error, info};
use std::net::IpAddr;
use std::process;

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, Command};
use tokio::sync::watch;

use stun_server::server::{Server, ServerConfig};
use stun_server::signal::wait_shutdown;

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

fn ip_arg(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .long(name)
        .takes_value(true)
        .required(true)
        .help(help)
        .value_parser(ValueParser::new(parse_ip))
}

fn port_arg(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .long(name)
        .takes_value(true)
        .required(true)
        .help(help)
        .value_parser(clap::value_parser!(u16).range(1..65536))
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let app = Command::new(APP_NAME)
        .version(APP_VERSION)
        .about("a small stun server for nat behavior discovery")
        .arg(ip_arg("ip1", "primary ip"))
        .arg(ip_arg("ip2", "alternative ip"))
        .arg(port_arg("port1", "primary port"))
        .arg(port_arg("port2", "alternative port"))
        .arg(
            Arg::new("minimal")
                .long("minimal")
                .action(ArgAction::SetTrue)
                .help("answer with a single MAPPED-ADDRESS"),
        )
        .get_matches();

    let ip1: IpAddr = *app.get_one("ip1").expect("wrong ip1");
    let ip2: IpAddr = *app.get_one("ip2").expect("wrong ip2");

    let port1: u16 = *app.get_one("port1").expect("wrong port1");
    let port2: u16 = *app.get_one("port2").expect("wrong port2");

    let minimal = app.get_one::<bool>("minimal").copied().unwrap_or(false);

    if ip1 == ip2 {
        error!("error, ip1 equal ip2");
        process::exit(1);
    }
    if port1 == port2 {
        error!("error, port1 equal port2");
        process::exit(1);
    }

    debug!("ip:{},{}  port:{},{}  minimal:{}", ip1, ip2, port1, port2, minimal);

    let config = ServerConfig {
        ips: [ip1, ip2],
        ports: [port1, port2],
        minimal,
    };

    let (signal_tx, signal_rx) = watch::channel(false);
    let _signal_handle = tokio::spawn(wait_shutdown(signal_tx));

    let server = match Server::new(config, signal_rx).await {
        Ok(v) => v,
        Err(e) => {
            error!("error, bind sockets, {:?}", e);
            process::exit(1);
        }
    };

    info!("start server ...");
    server.run().await;
    info!("server stopped.");
}
