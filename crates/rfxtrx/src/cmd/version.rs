use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("rfxtrx {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: rfxtrx");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("RFXTRX_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "defaults: device={} baud={}",
        rfxtrx::transport::DEFAULT_DEVICE_PATH,
        rfxtrx::transport::DEFAULT_BAUD_RATE
    );
    println!(
        "protocol: resend={}x{}ms boot_settle={}s",
        rfxtrx::session::RESEND_TIMES,
        rfxtrx::session::RESEND_DELAY.as_millis(),
        rfxtrx::session::BOOT_SETTLE.as_secs()
    );

    Ok(SUCCESS)
}
