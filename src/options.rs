//! Validated run configuration.
//!
//! [`Options`] is the single immutable configuration value every other
//! component borrows. It is built once, by [`Options::from_cli`], which
//! is also the single place argument validation happens — no other
//! component re-reads [`crate::cli::CliArgs`] or re-validates a flag
//! combination.

use crate::cli::CliArgs;
use crate::error::PartError;

/// Which dispatcher this run uses and its defining cap(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchMode {
    /// `-n N`: balanced fixed-count dispatch.
    FixedN(u32),
    /// `-f`/`-s` (at least one set): bounded variable-count dispatch.
    Variable {
        max_entries: Option<u32>,
        max_size: Option<u64>,
    },
}

/// Where root paths or arbitrary-value tuples are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A named file on disk.
    File(String),
    /// Tokens taken directly from the positional CLI arguments.
    Argv(Vec<String>),
}

/// Where manifests are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTemplate {
    /// No template given: every entry goes to a single stdout sink,
    /// each line prefixed by its partition ordinal.
    Absent,
    /// Template given as `"-"`: per-partition sections, all sharing
    /// stdout, lines are bare paths (no ordinal prefix).
    Dash,
    /// `T.i` per partition ordinal `i`.
    Path(String),
}

/// Validated, immutable run configuration built from [`CliArgs`].
#[derive(Debug, Clone)]
pub struct Options {
    pub dispatch_mode: DispatchMode,
    pub preload_size: u64,
    pub overload_size: u64,
    pub round_size: u64,
    pub dir_depth: Option<usize>,
    pub follow_symlinks: bool,
    pub cross_fs: bool,
    pub empty_dirs: bool,
    pub dnr_empty: bool,
    pub leaf_dirs: bool,
    pub add_slash: bool,
    pub live_mode: bool,
    pub pre_part_hook: Option<String>,
    pub post_part_hook: Option<String>,
    pub arbitrary_values: bool,
    pub input_source: InputSource,
    pub output_template: OutputTemplate,
    pub verbosity: u8,
}

impl Options {
    /// Validates a [`CliArgs`] value and produces an [`Options`].
    ///
    /// Enforces:
    /// - exactly one of `-n`/`-f`/`-s` selects the dispatch mode
    /// - hooks and `-L` are mutually required (hooks imply live mode is
    ///   meaningless without it; live mode requires variable-N)
    /// - `-r` (round_size), if given, is `>= 2`
    /// - `-Z` implies `-z`, `-D` implies `-z`
    pub fn from_cli(args: &CliArgs) -> Result<Options, PartError> {
        let selected = [
            args.num_parts.is_some(),
            args.max_entries.is_some(),
            args.max_size.is_some(),
        ]
        .iter()
        .filter(|b| **b)
        .count();

        if selected == 0 {
            return Err(PartError::ArgumentError(
                "exactly one of -n/-f/-s is required".to_string(),
            ));
        }

        let dispatch_mode = if let Some(n) = args.num_parts {
            if args.max_entries.is_some() || args.max_size.is_some() {
                return Err(PartError::ArgumentError(
                    "-n is incompatible with -f and -s".to_string(),
                ));
            }
            if n == 0 {
                return Err(PartError::ArgumentError(
                    "-n must be at least 1".to_string(),
                ));
            }
            if args.live_mode {
                return Err(PartError::ArgumentError(
                    "-L requires variable-N mode (-f or -s), not -n".to_string(),
                ));
            }
            DispatchMode::FixedN(n)
        } else {
            if let Some(f) = args.max_entries {
                if f == 0 {
                    return Err(PartError::ArgumentError(
                        "-f must be at least 1".to_string(),
                    ));
                }
            }
            if let Some(s) = args.max_size {
                if s == 0 {
                    return Err(PartError::ArgumentError(
                        "-s must be at least 1".to_string(),
                    ));
                }
            }
            DispatchMode::Variable {
                max_entries: args.max_entries,
                max_size: args.max_size,
            }
        };

        if (args.pre_part_hook.is_some() || args.post_part_hook.is_some()) && !args.live_mode {
            return Err(PartError::ArgumentError(
                "-w/-W require -L (live mode)".to_string(),
            ));
        }

        let round_size = match args.round_size {
            Some(r) if r < 2 => {
                return Err(PartError::ArgumentError(
                    "-r must be at least 2".to_string(),
                ));
            }
            Some(r) => r,
            None => 0,
        };

        // -Z and -D both force the empty-dirs policy on.
        let empty_dirs = args.empty_dirs || args.dnr_empty || args.leaf_dirs;

        let input_source = match &args.input_file {
            Some(path) if path == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(path.clone()),
            None => InputSource::Argv(args.args.clone()),
        };

        let output_template = match args.output_template.as_deref() {
            None => OutputTemplate::Absent,
            Some("-") => OutputTemplate::Dash,
            Some(tpl) => OutputTemplate::Path(tpl.to_string()),
        };

        Ok(Options {
            dispatch_mode,
            preload_size: args.preload_size,
            overload_size: args.overload_size,
            round_size,
            dir_depth: args.dir_depth,
            follow_symlinks: args.follow_symlinks,
            cross_fs: args.cross_fs,
            empty_dirs,
            dnr_empty: args.dnr_empty,
            leaf_dirs: args.leaf_dirs,
            add_slash: args.add_slash,
            live_mode: args.live_mode,
            pre_part_hook: args.pre_part_hook.clone(),
            post_part_hook: args.post_part_hook.clone(),
            arbitrary_values: args.arbitrary_values,
            input_source,
            output_template,
            verbosity: args.verbosity,
        })
    }

    /// Maps `-v` repeat count to a `log` level filter.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        level_filter_for(self.verbosity)
    }
}

/// Maps a `-v` repeat count to a `log` level filter. Exposed standalone so
/// the binary can install a logger before argument validation has run
/// (e.g. to log the validation error itself).
pub fn level_filter_for(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}
