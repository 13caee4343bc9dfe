//! Command-line interface argument parsing.
//!
//! This module defines the raw, unvalidated shape of argv via `clap`'s
//! derive macros. [`CliArgs`] is intentionally permissive — flag
//! combinations that don't make sense together (e.g. `-n` with `-s`) are
//! caught later by [`crate::options::Options::from_cli`], the single
//! validation choke point. `cli` itself never fails except on clap's own
//! parse/type errors.

use clap::Parser;

/// Command-line arguments for the partitioning engine.
///
/// # Examples
///
/// ```
/// use partr::cli::CliArgs;
/// use clap::Parser;
///
/// let args = CliArgs::parse_from(["partr", "-n", "4", "/data"]);
/// assert_eq!(args.num_parts, Some(4));
/// assert_eq!(args.args, vec!["/data"]);
/// ```
#[derive(Parser, Debug)]
#[command(name = "partr", about = "Partitions file trees into balanced or bounded manifest groups", version)]
pub struct CliArgs {
    /// Fixed partition count (incompatible with -f, -s, -L)
    #[arg(short = 'n', long = "num-parts")]
    pub num_parts: Option<u32>,

    /// Max entries per partition (variable-N mode)
    #[arg(short = 'f', long = "max-entries")]
    pub max_entries: Option<u32>,

    /// Max size per partition, in bytes (variable-N mode)
    #[arg(short = 's', long = "max-size")]
    pub max_size: Option<u64>,

    /// Input file ("-" for stdin); when absent, roots/tuples come from ARGS
    #[arg(short = 'i', long = "input-file")]
    pub input_file: Option<String>,

    /// Input lines are "<size> <path>" tuples, not filesystem paths
    #[arg(short = 'a', long = "arbitrary-values")]
    pub arbitrary_values: bool,

    /// Output template ("-" for stdout); partition i goes to TEMPLATE.i
    #[arg(short = 'o', long = "output-template")]
    pub output_template: Option<String>,

    /// Directory-aggregation depth: stop per-file listing at this crawl depth
    #[arg(short = 'd', long = "dir-depth")]
    pub dir_depth: Option<usize>,

    /// Append "/" to directory paths in manifest output
    #[arg(short = 'e', long = "add-slash")]
    pub add_slash: bool,

    /// Emit empty directories as zero-size entries
    #[arg(short = 'z', long = "empty-dirs")]
    pub empty_dirs: bool,

    /// Treat unreadable directories as empty rather than failing (implies -z)
    #[arg(short = 'Z', long = "dnr-empty")]
    pub dnr_empty: bool,

    /// Aggregate leaf directories into one entry each (implies -z)
    #[arg(short = 'D', long = "leaf-dirs")]
    pub leaf_dirs: bool,

    /// Live mode: flush and hook each partition as it closes (requires variable-N)
    #[arg(short = 'L', long = "live-mode")]
    pub live_mode: bool,

    /// Pre-partition hook command (live mode only)
    #[arg(short = 'w', long = "pre-hook")]
    pub pre_part_hook: Option<String>,

    /// Post-partition hook command (live mode only)
    #[arg(short = 'W', long = "post-hook")]
    pub post_part_hook: Option<String>,

    /// Follow symlinks while crawling
    #[arg(short = 'l', long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Do not cross filesystem boundaries while crawling
    #[arg(short = 'x', long = "cross-fs", action = clap::ArgAction::SetFalse)]
    pub cross_fs: bool,

    /// Preload bytes charged to every partition at creation
    #[arg(short = 'p', long = "preload-size", default_value_t = 0)]
    pub preload_size: u64,

    /// Overload bytes added to every entry's size
    #[arg(short = 'q', long = "overload-size", default_value_t = 0)]
    pub overload_size: u64,

    /// Round entry size up to the next multiple of N (N >= 2)
    #[arg(short = 'r', long = "round-size")]
    pub round_size: Option<u64>,

    /// Verbose output (repeatable: -v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Root paths, or "<size> <path>" tokens with -a, when -i is not given
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_empty() {
        let args = CliArgs::parse_from(["partr"]);
        assert_eq!(args.num_parts, None);
        assert_eq!(args.max_entries, None);
        assert_eq!(args.max_size, None);
        assert!(!args.arbitrary_values);
        assert!(args.cross_fs);
        assert_eq!(args.preload_size, 0);
        assert_eq!(args.overload_size, 0);
        assert_eq!(args.verbosity, 0);
        assert!(args.args.is_empty());
    }

    #[test]
    fn test_fixed_n() {
        let args = CliArgs::parse_from(["partr", "-n", "4", "/data"]);
        assert_eq!(args.num_parts, Some(4));
        assert_eq!(args.args, vec!["/data".to_string()]);
    }

    #[test]
    fn test_variable_n_flags() {
        let args = CliArgs::parse_from(["partr", "-f", "100", "-s", "4096"]);
        assert_eq!(args.max_entries, Some(100));
        assert_eq!(args.max_size, Some(4096));
    }

    #[test]
    fn test_policy_flags() {
        let args = CliArgs::parse_from(["partr", "-z", "-Z", "-D", "-e"]);
        assert!(args.empty_dirs);
        assert!(args.dnr_empty);
        assert!(args.leaf_dirs);
        assert!(args.add_slash);
    }

    #[test]
    fn test_cross_fs_flag_sets_false() {
        let args = CliArgs::parse_from(["partr", "-x"]);
        assert!(!args.cross_fs);
    }

    #[test]
    fn test_live_mode_hooks() {
        let args = CliArgs::parse_from([
            "partr", "-L", "-w", "pre.sh", "-W", "post.sh", "-s", "100", "-o", "out",
        ]);
        assert!(args.live_mode);
        assert_eq!(args.pre_part_hook.as_deref(), Some("pre.sh"));
        assert_eq!(args.post_part_hook.as_deref(), Some("post.sh"));
    }

    #[test]
    fn test_verbosity_count() {
        let args = CliArgs::parse_from(["partr", "-vv"]);
        assert_eq!(args.verbosity, 2);
    }

    #[test]
    fn test_accounting_flags() {
        let args = CliArgs::parse_from(["partr", "-p", "512", "-q", "8", "-r", "64"]);
        assert_eq!(args.preload_size, 512);
        assert_eq!(args.overload_size, 8);
        assert_eq!(args.round_size, Some(64));
    }

    #[test]
    fn test_input_file_and_arbitrary() {
        let args = CliArgs::parse_from(["partr", "-i", "-", "-a"]);
        assert_eq!(args.input_file.as_deref(), Some("-"));
        assert!(args.arbitrary_values);
    }

    #[test]
    fn test_multiple_positional_args() {
        let args = CliArgs::parse_from(["partr", "-n", "2", "/tmp", "/var"]);
        assert_eq!(args.args, vec!["/tmp".to_string(), "/var".to_string()]);
    }
}
