use std::sync::Arc;
use chord_ring::{
	core::{
		self,
		config::*,
		NodeServer,
		Node
	},
	transport::TcpTransport
};
use clap::Parser;
use anyhow::anyhow;

#[derive(Parser)]
struct Args {
	/// Local addr to bind (<host>:<port>)
	addr: String,

	/// Join an existing node on init (<host>:<port>)
	#[clap(short, long)]
	join: Option<String>,

	/// Key of this node on the ring (hash of addr by default)
	#[clap(short, long)]
	key: Option<u64>,

	/// Interval of maintenance rounds in ms (0 disables it)
	#[clap(short, long, default_value_t = 200)]
	interval: u64,

	/// Number of successors kept for recovery (at least 1)
	#[clap(short, long, default_value_t = 4)]
	successors: usize
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
	if args.successors == 0 {
		return Err(anyhow!("--successors must be at least 1"));
	}
	Ok(Config {
		maintenance_interval: args.interval,
		successor_list_size: args.successors,
		..Config::default()
	})
}


#[tokio::main]
async fn main() -> anyhow::Result<()> {
	env_logger::init();
	let args = Args::parse();
	let config = build_config(&args)?;

	let node = match args.key {
		Some(id) => Node::new(id, args.addr.as_str()),
		None => core::construct_node(&args.addr)
	};
	let transport = Arc::new(TcpTransport::new(config.connect_timeout, config.max_connections));

	let s = NodeServer::new(node, config, transport);
	// The known node may run with an explicit key, so only its address is used
	let manager = match args.join.as_ref() {
		Some(addr) => s.start_joining(addr).await?,
		None => s.start(None).await?
	};
	manager.wait().await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_config() {
		let args = Args::parse_from(["chord-ring-server", "127.0.0.1:9900", "-s", "2", "-i", "0"]);
		let config = build_config(&args).unwrap();
		assert_eq!(config.successor_list_size, 2);
		assert_eq!(config.maintenance_interval, 0);

		let args = Args::parse_from(["chord-ring-server", "127.0.0.1:9900", "--successors", "0"]);
		assert!(build_config(&args).is_err());
	}
}
