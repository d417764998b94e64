use crate::config::toml_config::TomlConfig;
use crate::config::CureOptions;
use crate::core::discovery::default_extensions;
use crate::utils::error::Result;
use crate::utils::validation::normalize_extensions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "antidotv")]
#[command(about = "Anti wildcards in Verilog and SystemVerilog files")]
pub struct CliConfig {
    /// File or directory to search for wildcard instantiations
    pub path: PathBuf,

    /// File or directory holding the definitions of the instantiated modules
    pub root: PathBuf,

    #[arg(long, help = "Order the I/Os after fixing the wildcards")]
    pub order: bool,

    #[arg(long, help = "Report what would change without writing any file")]
    pub dry_run: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Recognized source file extensions (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Merges the command line with the optional configuration file.
    /// Flags given on the command line win over the file, which wins over defaults.
    pub fn resolve(&self) -> Result<CureOptions> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(self.merge(&file))
    }

    pub fn merge(&self, file: &TomlConfig) -> CureOptions {
        let extensions = if !self.extensions.is_empty() {
            normalize_extensions(&self.extensions)
        } else if let Some(extensions) = file.extensions() {
            normalize_extensions(extensions)
        } else {
            default_extensions()
        };

        CureOptions {
            target_path: self.path.clone(),
            search_root: self.root.clone(),
            extensions,
            order_ports: self.order || file.order(),
            dry_run: self.dry_run || file.dry_run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_and_flags() {
        let cli = CliConfig::try_parse_from(["antidotv", "rtl/top.sv", "rtl", "--order"]).unwrap();

        assert_eq!(cli.path, PathBuf::from("rtl/top.sv"));
        assert_eq!(cli.root, PathBuf::from("rtl"));
        assert!(cli.order);
        assert!(!cli.dry_run);
        assert!(cli.extensions.is_empty());
    }

    #[test]
    fn test_missing_root_is_rejected() {
        assert!(CliConfig::try_parse_from(["antidotv", "rtl"]).is_err());
    }

    #[test]
    fn test_merge_precedence() {
        let cli = CliConfig::try_parse_from(["antidotv", "a", "b", "--extensions", ".sv,v"]).unwrap();
        let file = TomlConfig::from_toml_str(
            "[discovery]\nextensions = [\"svh\"]\n[rewrite]\norder = true\n",
        )
        .unwrap();

        let options = cli.merge(&file);
        assert_eq!(options.extensions, vec!["sv", "v"]);
        assert!(options.order_ports);

        let cli = CliConfig::try_parse_from(["antidotv", "a", "b"]).unwrap();
        assert_eq!(cli.merge(&file).extensions, vec!["svh"]);
        assert_eq!(cli.merge(&TomlConfig::default()).extensions, default_extensions());
    }
}
