use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "crowdfund-cli")]
#[command(about = "Command-line client for the crowdfunding portal", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5173")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List campaigns
    Campaigns {
        #[arg(short, long, default_value = "")]
        search: String,
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Show one campaign
    Campaign { id: String },
    /// Create a campaign
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        image_url: String,
        /// Target in ETH
        #[arg(long)]
        target: String,
        /// RFC 3339 or YYYY-MM-DDTHH:MM (UTC)
        #[arg(long)]
        deadline: String,
    },
    /// Donate to a campaign
    Donate {
        id: String,
        /// Amount in ETH
        amount: String,
    },
    /// Withdraw a campaign's funds (owner only)
    Withdraw { id: String },
    /// Show the admin panel
    Admin,
    /// Withdraw platform fees (admin only)
    WithdrawFees,
    /// Show wallet state
    Wallet,
    /// Connect the wallet
    Connect,
    /// Disconnect the wallet
    Disconnect,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Campaigns { search, filter } => {
            client
                .get(format!("{}/", base))
                .query(&[("search", search), ("filter", filter)])
                .send()
                .await?
        }
        Commands::Campaign { id } => client.get(format!("{}/campaign/{}", base, id)).send().await?,
        Commands::Create {
            name,
            description,
            image_url,
            target,
            deadline,
        } => {
            client
                .post(format!("{}/create", base))
                .json(&json!({
                    "name": name,
                    "description": description,
                    "imageUrl": image_url,
                    "targetAmount": target,
                    "deadline": deadline,
                }))
                .send()
                .await?
        }
        Commands::Donate { id, amount } => {
            client
                .post(format!("{}/campaign/{}/donate", base, id))
                .json(&json!({ "amount": amount }))
                .send()
                .await?
        }
        Commands::Withdraw { id } => {
            client
                .post(format!("{}/campaign/{}/withdraw", base, id))
                .send()
                .await?
        }
        Commands::Admin => client.get(format!("{}/admin", base)).send().await?,
        Commands::WithdrawFees => client.post(format!("{}/admin/withdraw-fees", base)).send().await?,
        Commands::Wallet => client.get(format!("{}/wallet", base)).send().await?,
        Commands::Connect => client.post(format!("{}/wallet/connect", base)).send().await?,
        Commands::Disconnect => client.post(format!("{}/wallet/disconnect", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: portal returned status {}", status);
        if let Ok(text) = res.text().await {
            match serde_json::from_str::<Value>(&text) {
                Ok(body) => eprintln!("{}", serde_json::to_string_pretty(&body)?),
                Err(_) => eprintln!("Response: {}", text),
            }
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
