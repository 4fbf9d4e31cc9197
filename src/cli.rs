//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `listing-id`.
#[derive(Debug, Parser)]
#[command(name = "listing-id", version, about = "Allocate sequential property listing identifiers")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the known listing families.
    Families,
    /// Print the next identifier without storing anything.
    Allocate(AllocateArgs),
    /// Allocate an identifier and store a new listing under it.
    Create {
        /// Family key (see `families`).
        family: String,
        /// Listing field as `key=value`; may be repeated.
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// List the stored listings of a family.
    List {
        /// Family key (see `families`).
        family: String,
    },
}

/// Arguments for `allocate`.
#[derive(Debug, Args)]
pub struct AllocateArgs {
    /// Family key (see `families`).
    #[arg(required_unless_present = "prefix", conflicts_with = "prefix")]
    pub family: Option<String>,
    /// Allocate for an arbitrary prefix instead of a family.
    #[arg(long)]
    pub prefix: Option<String>,
    /// Sequence padding width for `--prefix`.
    #[arg(long, requires = "prefix")]
    pub width: Option<usize>,
    /// Collection to scan for `--prefix`; defaults to the collection of the
    /// family owning the prefix.
    #[arg(long, requires = "prefix")]
    pub collection: Option<String>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_allocate_by_family() {
        let cli = Cli::parse_from(["listing-id", "allocate", "residential-rent-pg"]);
        let Command::Allocate(args) = cli.command else { panic!("expected allocate") };
        assert_eq!(args.family.as_deref(), Some("residential-rent-pg"));
        assert!(args.prefix.is_none());
    }

    #[test]
    fn parses_allocate_by_prefix_with_width() {
        let cli = Cli::parse_from(["listing-id", "allocate", "--prefix", "RA-X", "--width", "6"]);
        let Command::Allocate(args) = cli.command else { panic!("expected allocate") };
        assert_eq!(args.prefix.as_deref(), Some("RA-X"));
        assert_eq!(args.width, Some(6));
    }

    #[test]
    fn allocate_needs_family_or_prefix() {
        assert!(Cli::try_parse_from(["listing-id", "allocate"]).is_err());
        assert!(Cli::try_parse_from(["listing-id", "allocate", "--width", "3"]).is_err());
        assert!(
            Cli::try_parse_from(["listing-id", "allocate", "residential-rent-pg", "--prefix", "P"])
                .is_err()
        );
    }

    #[test]
    fn parses_create_fields() {
        let cli = Cli::parse_from([
            "listing-id",
            "create",
            "commercial-lease-shop",
            "--field",
            "city=Pune",
            "--field",
            "area=1200 sqft",
        ]);
        let Command::Create { family, fields } = cli.command else { panic!("expected create") };
        assert_eq!(family, "commercial-lease-shop");
        assert_eq!(
            fields,
            vec![("city".to_string(), "Pune".to_string()), ("area".to_string(), "1200 sqft".to_string())]
        );
    }

    #[test]
    fn rejects_field_without_equals() {
        assert!(Cli::try_parse_from(["listing-id", "create", "x", "--field", "city"]).is_err());
    }
}
