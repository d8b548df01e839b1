use std::path::Path;

use crate::utils::cli::ServerArgs;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageType {
    Filesystem,
    #[cfg(feature = "s3")]
    S3,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub bucket: String,
    pub storage_typ: StorageType,
    pub root_dir: String,
    pub s3_endpoint: Option<String>,
    pub context_path: String,
    pub max_upload_bytes: usize,
    pub jwt_secret: String,
    pub jwt_lifetime_secs: i64,
}

/// Resolves the configuration, collecting every problem instead of stopping
/// at the first one.
pub fn validate_config(args: &ServerArgs) -> Result<Config, Vec<String>> {
    let mut validation_errors = Vec::new();

    if args.bucket.trim().is_empty() {
        validation_errors.push("IMAGE_GATEWAY_BUCKET must not be empty".to_string());
    }

    let storage_typ = match args.storage.to_ascii_uppercase().as_str() {
        "FILESYSTEM" => {
            match std::fs::metadata(Path::new(&args.root)) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => validation_errors.push(format!(
                    "IMAGE_GATEWAY_ROOTDIR `{}` exists but is not a directory",
                    args.root,
                )),
                Err(_) => validation_errors.push(format!(
                    "IMAGE_GATEWAY_ROOTDIR `{}` does not exist.",
                    args.root,
                )),
            }
            StorageType::Filesystem
        }
        #[cfg(feature = "s3")]
        "S3" => StorageType::S3,
        #[cfg(not(feature = "s3"))]
        "S3" => {
            validation_errors
                .push("IMAGE_GATEWAY_STORAGE `S3` requires the `s3` feature".to_string());
            StorageType::Filesystem
        }
        other => {
            validation_errors.push(format!("IMAGE_GATEWAY_STORAGE `{other}` is not supported"));
            StorageType::Filesystem
        }
    };

    let context_path = args.context_path.trim_end_matches('/').to_string();
    if !context_path.is_empty() && !context_path.starts_with('/') {
        validation_errors.push(format!(
            "IMAGE_GATEWAY_CONTEXT_PATH `{}` must start with `/`",
            args.context_path,
        ));
    }

    let jwt_secret = jwt_secret();
    let jwt_lifetime_secs = jwt_lifetime_secs().unwrap_or_else(|e| {
        validation_errors.push(e);
        0
    });

    if !validation_errors.is_empty() {
        return Err(validation_errors);
    }

    Ok(Config {
        host: args.host.clone(),
        port: args.port,
        bucket: args.bucket.clone(),
        storage_typ,
        root_dir: args.root.clone(),
        s3_endpoint: args.s3_endpoint.clone(),
        context_path,
        max_upload_bytes: args.max_upload_bytes,
        jwt_secret,
        jwt_lifetime_secs,
    })
}

pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET is not set. Use default value: `secret`");
        "secret".into()
    })
}

pub fn jwt_lifetime_secs() -> Result<i64, String> {
    match std::env::var("JWT_LIFETIME_SECONDS") {
        Ok(value) => value
            .parse::<i64>()
            .map_err(|_| format!("JWT_LIFETIME_SECONDS `{value}` is not a number")),
        Err(_) => Ok(3600),
    }
}
