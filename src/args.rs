use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Camera Index (default 0)
    #[arg(short, long, default_value_t = 0)]
    pub cam_index: u32,

    /// Path to the JSON config (created with defaults if missing)
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Hand landmark ONNX model (overrides detector.model_path)
    #[arg(long)]
    pub model: Option<String>,

    /// Mirror the camera output (overrides camera.mirror)
    #[arg(long, conflicts_with = "no_mirror")]
    pub mirror: bool,

    /// Do not mirror the camera output
    #[arg(long)]
    pub no_mirror: bool,

    /// Log toggles instead of running the action command
    #[arg(long)]
    pub dry_run: bool,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}

impl Args {
    pub fn mirror_override(&self) -> Option<bool> {
        match (self.mirror, self.no_mirror) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["hand-toggle"]);
        assert_eq!(args.cam_index, 0);
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.mirror_override(), None);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from(["hand-toggle", "-c", "2", "--no-mirror", "--dry-run", "--model", "m.onnx"]);
        assert_eq!(args.cam_index, 2);
        assert_eq!(args.mirror_override(), Some(false));
        assert!(args.dry_run);
        assert_eq!(args.model.as_deref(), Some("m.onnx"));
    }

    #[test]
    fn test_mirror_flags_conflict() {
        assert!(Args::try_parse_from(["hand-toggle", "--mirror", "--no-mirror"]).is_err());
    }
}
