use clap::Parser;
use url::Url;

/// MCP server exposing a remote GraphQL endpoint as discovery and query tools
#[derive(Debug, Parser)]
#[command(name = "tablegraph", version)]
pub struct Args {
    /// URL of the GraphQL endpoint
    pub endpoint: Url,
    /// Add a header to every request, in 'name: value' form
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
    /// Log filter directives, e.g. 'tablegraph=debug'
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Args {
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().filter_map(|header| split_header(header))
    }
}

fn split_header(header: &str) -> Option<(&str, &str)> {
    header
        .split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
}

pub fn parse() -> Args {
    Args::parse()
}
