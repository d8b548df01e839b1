use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the gateway (the default when no subcommand is given)
    Serve,

    /// Mint a bearer token signed with the configured JWT secret
    Token {
        /// Subject the token is issued to
        #[arg(long)]
        sub: String,

        /// Role granted to the subject, may be repeated
        #[arg(long = "role")]
        roles: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    /// Gateway listening host
    #[arg(long, env = "IMAGE_GATEWAY_HOST", default_value = "127.0.0.1", global = true)]
    pub host: String,

    /// Gateway listening port
    #[arg(short, long, env = "IMAGE_GATEWAY_PORT", default_value_t = 8080, global = true)]
    pub port: u16,

    /// Bucket every object is read from and written to
    #[arg(short, long, env = "IMAGE_GATEWAY_BUCKET", default_value = "", global = true)]
    pub bucket: String,

    /// Storage backend type
    #[arg(
        short,
        long,
        env = "IMAGE_GATEWAY_STORAGE",
        default_value = "FILESYSTEM",
        global = true
    )]
    pub storage: String,

    /// Filesystem backend root path
    #[arg(
        long,
        env = "IMAGE_GATEWAY_ROOTDIR",
        default_value = "/var/lib/image-gateway",
        global = true
    )]
    pub root: String,

    /// Endpoint of an S3-compatible service, uses AWS defaults when unset
    #[arg(long, env = "IMAGE_GATEWAY_S3_ENDPOINT", global = true)]
    pub s3_endpoint: Option<String>,

    /// Path every route is nested under, e.g. `/image-service`
    #[arg(long, env = "IMAGE_GATEWAY_CONTEXT_PATH", default_value = "", global = true)]
    pub context_path: String,

    /// Largest accepted upload request body in bytes
    #[arg(
        long,
        env = "IMAGE_GATEWAY_MAX_UPLOAD_BYTES",
        default_value_t = 10 * 1024 * 1024,
        global = true
    )]
    pub max_upload_bytes: usize,
}
