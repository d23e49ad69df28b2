//! Line-oriented command scripts for driving a [`DesignStudio`].
//!
//! ```text
//! # comments and blank lines are ignored
//! garment hoodie
//! fabric wool
//! pattern back stripes
//! color royal blue
//! undo
//! ```

use anyhow::{bail, Context, Result};
use std::fmt;
use std::str::FromStr;

use super::studio::DesignStudio;
use crate::error::StudioResult;
use crate::models::HistoryEntry;

/// One studio command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    /// `garment <id>`
    Garment(String),
    /// `fabric <id>`
    Fabric(String),
    /// `region <id>`
    Region(String),
    /// `pattern <region> <pattern-id>`
    Pattern {
        /// Target region
        region: String,
        /// Pattern to apply
        pattern: String,
    },
    /// `clear-pattern <region>`
    ClearPattern(String),
    /// `color <name...>`
    Color(String),
    /// `element <id>`
    Element(String),
    /// `image <file-name>`
    Image(String),
    /// `undo`
    Undo,
    /// `redo`
    Redo,
}

impl FromStr for StudioCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb {
            "garment" => Self::Garment(single_arg(verb, rest)?),
            "fabric" => Self::Fabric(single_arg(verb, rest)?),
            "region" => Self::Region(single_arg(verb, rest)?),
            "clear-pattern" => Self::ClearPattern(single_arg(verb, rest)?),
            "element" => Self::Element(single_arg(verb, rest)?),
            "pattern" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                let [region, pattern] = args.as_slice() else {
                    bail!("'pattern' expects <region> <pattern-id>");
                };
                Self::Pattern {
                    region: (*region).to_string(),
                    pattern: (*pattern).to_string(),
                }
            }
            "color" | "image" => {
                if rest.is_empty() {
                    bail!("'{verb}' expects an argument");
                }
                if verb == "color" {
                    Self::Color(rest.to_string())
                } else {
                    Self::Image(rest.to_string())
                }
            }
            "undo" | "redo" => {
                if !rest.is_empty() {
                    bail!("'{verb}' takes no arguments");
                }
                if verb == "undo" {
                    Self::Undo
                } else {
                    Self::Redo
                }
            }
            "" => bail!("Empty command"),
            other => bail!("Unknown command '{other}'"),
        };

        Ok(command)
    }
}

fn single_arg(verb: &str, rest: &str) -> Result<String> {
    let mut args = rest.split_whitespace();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg.to_string()),
        _ => bail!("'{verb}' expects exactly one argument"),
    }
}

impl fmt::Display for StudioCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Garment(id) => write!(f, "garment {id}"),
            Self::Fabric(id) => write!(f, "fabric {id}"),
            Self::Region(id) => write!(f, "region {id}"),
            Self::Pattern { region, pattern } => write!(f, "pattern {region} {pattern}"),
            Self::ClearPattern(region) => write!(f, "clear-pattern {region}"),
            Self::Color(name) => write!(f, "color {name}"),
            Self::Element(id) => write!(f, "element {id}"),
            Self::Image(file_name) => write!(f, "image {file_name}"),
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

/// Parses a whole script, skipping blank lines and `#` comments.
///
/// Returns each command with its 1-based line number.
pub fn parse_script(script: &str) -> Result<Vec<(usize, StudioCommand)>> {
    script
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            line.parse::<StudioCommand>()
                .with_context(|| format!("Line {line_no}: '{line}'"))
                .map(|command| (line_no, command))
        })
        .collect()
}

impl DesignStudio {
    /// Dispatches `command` and returns the history entry it recorded or
    /// moved to.
    pub fn apply(&mut self, command: &StudioCommand) -> StudioResult<HistoryEntry> {
        let entry = match command {
            StudioCommand::Garment(id) => self.select_garment(id)?,
            StudioCommand::Fabric(id) => self.select_fabric(id)?,
            StudioCommand::Region(id) => self.select_region(id)?,
            StudioCommand::Pattern { region, pattern } => {
                self.apply_pattern_to_region(region, pattern)?
            }
            StudioCommand::ClearPattern(region) => self.clear_region_pattern(region)?,
            StudioCommand::Color(name) => self.select_color(name)?,
            StudioCommand::Element(id) => self.add_element(id)?,
            StudioCommand::Image(file_name) => self.add_image(file_name)?,
            StudioCommand::Undo => self.undo()?,
            StudioCommand::Redo => self.redo()?,
        };
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogKind, ErrorKind, StudioError};
    use crate::models::Catalog;

    #[test]
    fn test_parse_each_command() {
        let cases = [
            ("garment hoodie", StudioCommand::Garment("hoodie".into())),
            ("fabric  silk", StudioCommand::Fabric("silk".into())),
            ("region back", StudioCommand::Region("back".into())),
            (
                "pattern sleeves plaid",
                StudioCommand::Pattern {
                    region: "sleeves".into(),
                    pattern: "plaid".into(),
                },
            ),
            ("clear-pattern sleeves", StudioCommand::ClearPattern("sleeves".into())),
            ("color Royal Blue", StudioCommand::Color("Royal Blue".into())),
            ("element star", StudioCommand::Element("star".into())),
            ("image my tiger.png", StudioCommand::Image("my tiger.png".into())),
            ("  undo ", StudioCommand::Undo),
            ("redo", StudioCommand::Redo),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<StudioCommand>().unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!("dance".parse::<StudioCommand>().is_err());
        assert!("garment".parse::<StudioCommand>().is_err());
        assert!("garment a b".parse::<StudioCommand>().is_err());
        assert!("pattern front".parse::<StudioCommand>().is_err());
        assert!("undo twice".parse::<StudioCommand>().is_err());
        assert!("color".parse::<StudioCommand>().is_err());
        assert!("".parse::<StudioCommand>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let command = StudioCommand::Pattern {
            region: "front".into(),
            pattern: "chevron".into(),
        };
        assert_eq!(command.to_string().parse::<StudioCommand>().unwrap(), command);
    }

    #[test]
    fn test_parse_script_skips_comments() {
        let script = "# start\n\ngarment polo\n  # indented comment\nundo\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                (3, StudioCommand::Garment("polo".into())),
                (5, StudioCommand::Undo)
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("garment polo\nsew buttons\n").unwrap_err();
        assert!(format!("{err:#}").contains("Line 2"));
    }

    #[test]
    fn test_apply_dispatches() {
        let mut studio = DesignStudio::new(Catalog::load().unwrap()).unwrap();
        let entry = studio
            .apply(&StudioCommand::Pattern {
                region: "front".into(),
                pattern: "floral".into(),
            })
            .unwrap();
        assert_eq!(entry.action, "Applied Floral pattern to front");

        let entry = studio.apply(&StudioCommand::Undo).unwrap();
        assert_eq!(entry.action, "Started new design");

        let err = studio
            .apply(&StudioCommand::Element("unicorn".into()))
            .unwrap_err();
        assert_eq!(err, StudioError::not_found(CatalogKind::Element, "unicorn"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
