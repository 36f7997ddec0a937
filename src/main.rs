#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::{Parser, Subcommand};
    use std::error::Error;
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use vm_dashboard::config::ServerConfig;
    use vm_dashboard::consts::dashboard_consts::server::DEFAULT_BIND;
    use vm_dashboard::monitor::{MonitorOptions, run_checks};

    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    /// Dashboard of the powered-on VMs in a Nutanix Prism Central deployment
    struct Args {
        /// Command to execute
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Serve the dashboard and its VM API
        Serve {
            /// Address to listen on
            #[arg(long, default_value = DEFAULT_BIND)]
            bind: SocketAddr,

            /// JSON settings file; environment variables take precedence
            #[arg(long, value_name = "FILE")]
            config: Option<PathBuf>,
        },
        /// Probe a running dashboard and report its health
        Check {
            /// Base URL of the dashboard
            #[arg(long, default_value = "http://127.0.0.1:5000")]
            base_url: String,

            /// Dashboard username used for the login probe
            #[arg(long, env = "DASHBOARD_USERNAME")]
            username: Option<String>,

            /// Dashboard password used for the login probe
            #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
            password: Option<String>,

            /// Print the report as JSON
            #[arg(long)]
            json: bool,
        },
    }

    pub async fn run() -> Result<(), Box<dyn Error>> {
        vm_dashboard::logging::init();

        let args = Args::parse();
        match args.command {
            Command::Serve { bind, config } => {
                let config = ServerConfig::from_env(config.as_deref())?;
                vm_dashboard::server::serve(config, bind).await
            }
            Command::Check {
                base_url,
                username,
                password,
                json,
            } => {
                let mut options = MonitorOptions::new(base_url);
                if let (Some(username), Some(password)) = (username, password) {
                    options = options.with_credentials(username, password);
                }

                let report = run_checks(&options).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", report.render());
                }

                if report.all_passed() {
                    Ok(())
                } else {
                    Err("one or more health checks failed".into())
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> std::process::ExitCode {
    match cli::run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

// The browser build runs from the library's `wasm_bindgen(start)` entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
