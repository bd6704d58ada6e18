use std::path::PathBuf;

use clap::Parser;

const AFTER_HELP: &str = r#"Positional arguments:
    METHOD
      The HTTP method to be used for the request (GET, POST, PUT, DELETE, ...)
      (default: GET).

    URL
      The scheme defaults to 'http://' if the URL does not include one. A
      leading colon is shorthand for localhost:

          $ gdhttp :3000                  # => http://localhost:3000
          $ gdhttp :/foo                  # => http://localhost/foo

    REQUEST_ITEM
      Optional key-value pairs to be included in the request. The separator
      used determines the type:

      '=' URL parameters to be appended to the request URI:

          $ gdhttp example.com search=httpie

      '==' values substituted into <name> tokens of the URL:

          $ gdhttp example.com/jobs/<id> id==42

Sample configuration file:

{
    "auths": {
        "localhost": {
            "accessKeyID": "id",
            "accessKeySecret": "secret"
        }
    }
}"#;

/// Command line surface of gdhttp.
#[derive(Debug, Parser)]
#[command(
    name = "gdhttp",
    version,
    about = "gdhttp - a CLI, cURL-like tool for GeneDock signed APIs",
    override_usage = "gdhttp [OPTIONS] [METHOD] URL [REQUEST_ITEM]...",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Config file (default is $HOME/.gdhttp.json)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Access key ID
    #[arg(long, value_name = "ACCESSKEYID", default_value = "")]
    pub access_key_id: String,

    /// Access key secret
    #[arg(long, value_name = "ACCESSKEYSECRET", default_value = "")]
    pub access_key_secret: String,

    /// Print only the response body
    #[arg(short = 'b', long)]
    pub body: bool,

    /// Don't add Authorization header
    #[arg(long)]
    pub no_auth: bool,

    /// Verbose output. Print the whole request as well as the response
    #[arg(short, long)]
    pub verbose: bool,

    /// The connection timeout of the request in seconds
    #[arg(short, long, value_name = "TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// [METHOD] URL [REQUEST_ITEM]...
    #[arg(value_name = "ARG", required = true)]
    pub args: Vec<String>,
}
