use clap::Parser;
use hierarchy_id_cli::HidCli;

/// Main `hid` executable entrypoint.
pub fn main() -> anyhow::Result<()> {
    let cli = HidCli::parse();
    hierarchy_id_cli::trace::init_fmt(cli.log.as_deref())?;
    for line in cli.run()? {
        println!("{}", line);
    }
    Ok(())
}
