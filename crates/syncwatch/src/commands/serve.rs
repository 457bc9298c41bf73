//! Serve command implementation

use anyhow::Result;
use syncwatch_core::Config;

use crate::cli::ServeArgs;

pub async fn execute(mut config: Config, args: ServeArgs) -> Result<()> {
    if let Some(bind) = args.bind {
        config.web.bind = bind;
    }
    if args.api_key.is_some() {
        config.web.api_key = args.api_key;
    }

    syncwatch_web::start_server(&config).await?;
    Ok(())
}
