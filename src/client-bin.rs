use std::sync::Arc;
use chord_ring::{
	core::{
		calculate_hash,
		config::Config,
		connection::ConnectionPool,
		Node
	},
	monitor::{MonitorConfig, RingMonitor, Roster},
	rpc::NodeServiceClient,
	transport::TcpTransport
};
use tarpc::context;
use clap::Parser;
use inquire::{Text, CustomUserError};
use anyhow::anyhow;

#[derive(Parser)]
struct Args {
	/// Server addr to connect to (<host>:<port>)
	addr: String,
}

const COMMANDS: [&str; 6] = [
	"info",
	"lookup",
	"ping",
	"cycle",
	"heal",
	"toggle"
];

fn suggest_command(v: &str) -> Result<Vec<String>, CustomUserError> {
	let mut result = Vec::new();
	for command in COMMANDS {
		if v.len() > 0 && command.starts_with(v) {
			result.push(command.to_string());
		}
	}
	Ok(result)
}

fn complete_command(v: &str) -> Result<Option<String>, CustomUserError> {
	let result = suggest_command(v)?;
	let command = if result.len() > 0 {
		Some(result[0].clone() + " ")
	}
	else {
		None
	};
	Ok(command)
}

fn show(node: &Option<Node>) -> String {
	match node {
		Some(n) => n.to_string(),
		None => "-".to_string()
	}
}

struct Session {
	node: Node,
	client: NodeServiceClient,
	pool: ConnectionPool,
	monitor: RingMonitor
}

async fn execute_command(session: &Session, command: &str) -> anyhow::Result<()> {
	// execute command
	let words: Vec<_> = command.split_whitespace().collect();
	if words.len() == 0 {
		return Err(anyhow!("invalid command"));
	}

	let client = &session.client;
	let ctx = context::current();
	match words[0] {
		"info" => {
			println!("node: {}", session.node);
			println!("predecessor: {}", show(&client.get_predecessor_rpc(ctx).await?));
			println!("successor: {}", client.get_successor_rpc(ctx).await??);
			for (i, n) in client.get_successor_list_rpc(ctx).await?.iter().enumerate() {
				println!("successor[{}]: {}", i, n);
			}
			for (i, f) in client.get_finger_list_rpc(ctx).await?.iter().enumerate() {
				if f.is_some() {
					println!("finger[{}]: {}", i, show(f));
				}
			}
		},
		"lookup" => {
			if words.len() != 2 {
				return Err(anyhow!("lookup: invalid number of arguments"));
			}
			// numeric keys are used as is, anything else is hashed
			let id = match words[1].parse::<u64>() {
				Ok(id) => id,
				Err(_) => calculate_hash(words[1].as_bytes())
			};
			let owner = client.lookup_rpc(ctx, id).await??;
			println!("{} -> {}", id, owner);
		},
		"ping" => {
			client.ping_rpc(ctx).await?;
			println!("pong");
		},
		"cycle" => {
			let forwards = session.monitor.cycle_length_from(&session.node, true).await;
			let backwards = session.monitor.cycle_length_from(&session.node, false).await;
			println!("successor cycle: {}, predecessor cycle: {}", forwards, backwards);
		},
		"heal" => {
			if words.len() < 2 {
				return Err(anyhow!("heal: expect at least one more node address"));
			}
			let roster = Roster::new(vec![session.node.clone()]);
			for addr in &words[1..] {
				roster.add(session.pool.resolve(addr).await?);
			}
			println!("{:?}", session.monitor.scan(&roster).await);
		},
		"toggle" => {
			if words.len() != 3 {
				return Err(anyhow!("toggle: invalid number of arguments"));
			}
			let enabled = match words[2] {
				"on" => true,
				"off" => false,
				_ => return Err(anyhow!("toggle: expect on or off"))
			};
			match words[1] {
				"stabilization" => client.enable_stabilization_rpc(ctx, enabled).await?,
				"predecessor" => client.enable_predecessor_maintenance_rpc(ctx, enabled).await?,
				"fingers" => client.enable_peer_state_maintenance_rpc(ctx, enabled).await?,
				_ => return Err(anyhow!("toggle: unknown task {}", words[1]))
			};
		},
		_ => {
			return Err(anyhow!("invalid command"));
		}
	};
	Ok(())
}


#[tokio::main]
async fn main() -> anyhow::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let config = Config::default();
	let transport = Arc::new(TcpTransport::new(config.connect_timeout, config.max_connections));
	let pool = ConnectionPool::new(transport.clone(), config.rpc_timeout);
	let node = pool.resolve(&args.addr).await?;
	let client = pool.get(&node).await?;
	let session = Session {
		node,
		client,
		pool,
		monitor: RingMonitor::new(transport, MonitorConfig::default())
	};

	loop {
		let command = Text::new("")
			.with_suggester(&suggest_command)
			.with_completer(&complete_command)
			.prompt()?;

		match execute_command(&session, &command).await {
			Ok(_) => (),
			Err(e) => println!("Error: {}", e)
		};
	}
}
