use clap::Parser;

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    play: PlayArg,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    play::run(&args.play)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = CommandArgs::try_parse_from([
            "stackfall",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--log-file",
            "game.log",
            "--summary",
        ])
        .unwrap();
        assert_eq!(
            args.play.seed.map(|seed| seed.to_string()).as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert_eq!(
            args.play.log_file.as_deref(),
            Some(std::path::Path::new("game.log"))
        );
        assert!(args.play.summary);
    }

    #[test]
    fn test_reject_malformed_seed() {
        assert!(CommandArgs::try_parse_from(["stackfall", "--seed", "xyz"]).is_err());
    }
}
