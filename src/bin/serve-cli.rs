use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE, HOST};
use reqwest::Method;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "serve-cli")]
#[command(about = "Submit specifications to and query mocks from wirespec-serve", long_about = None)]
struct Cli {
    /// Address the server listens on.
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Domain appended to tenant labels in the Host header.
    #[arg(short, long, default_value = "serve.localhost")]
    domain: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a specification file and print its digest
    Submit {
        file: PathBuf,
        /// Host label used for the submission; must not name a stored specification
        #[arg(long, default_value = "submit")]
        via: String,
    },
    /// GET a path from a tenant's mock
    Get { tenant: String, path: String },
    /// Send an arbitrary method to a tenant's mock
    Request {
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        tenant: String,
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Submit { file, via } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let res = client
                .post(format!("{}/", base))
                .header(HOST, host_header(&via, &cli.domain)?)
                .body(text)
                .send()
                .await?;

            let status = res.status();
            let body = res.text().await?;
            if status.is_success() {
                println!("{}", body);
            } else {
                eprintln!("Error: submission returned status {}", status);
                eprintln!("Response: {}", body);
            }
        }
        Commands::Get { tenant, path } => {
            call(&client, base, &cli.domain, Method::GET, &tenant, &path).await?;
        }
        Commands::Request { method, tenant, path } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            call(&client, base, &cli.domain, method, &tenant, &path).await?;
        }
    }

    Ok(())
}

fn host_header(tenant: &str, domain: &str) -> Result<HeaderValue, reqwest::header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{}.{}", tenant, domain))
}

async fn call(
    client: &reqwest::Client,
    base: &str,
    domain: &str,
    method: Method,
    tenant: &str,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
    let res = client
        .request(method, format!("{}{}", base, path))
        .header(HOST, host_header(tenant, domain)?)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let is_json = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let body = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if !body.is_empty() {
            eprintln!("Response: {}", body);
        }
        return Ok(());
    }

    if is_json {
        let json: serde_json::Value = serde_json::from_str(&body)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", body);
    }
    Ok(())
}
