//!
//! # Technology Information CLI
//!
//! Lists, summarizes and exports the built-in technologies,
//! and checks technology files.
//!

use clap::{Parser, Subcommand};
use log::{debug, info};
use std::error::Error;
use std::fmt::Write;

// Use our own crates, by name
use tech21::{Technologies, Technology};
use tech21utils::{EnumStr, SerializationFormat};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// # Technology Information CLI
/// Lists, summarizes and exports technologies, and checks technology files.
#[derive(Parser)]
pub struct ProgramOptions {
    #[command(subcommand)]
    pub command: Command,
    /// Verbose Output Mode
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in technologies
    List,
    /// Show a technology's layers, arcs and nodes
    Show {
        /// Technology name
        tech: String,
    },
    /// Print a technology's unconnected spacing rules
    Rules {
        /// Technology name
        tech: String,
    },
    /// Export a built-in technology to a technology file
    Export {
        /// Technology name
        tech: String,
        /// Output File
        #[arg(short = 'o', long)]
        out: String,
        /// Output Format. One of ("json", "yaml", "toml"). Inferred from `out` if omitted.
        #[arg(short = 'f', long, default_value = "")]
        fmt: String,
    },
    /// Load and validate a technology file
    Check {
        /// Technology File
        file: String,
        /// Input Format. One of ("json", "yaml", "toml"). Inferred from `file` if omitted.
        #[arg(short = 'f', long, default_value = "")]
        fmt: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    let level = match options.verbose {
        true => "debug",
        false => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    let out = _main(&options)?;
    print!("{}", out);
    Ok(())
}

/// Run `options`, returning the text to be printed
pub fn _main(options: &ProgramOptions) -> Result<String, Box<dyn Error>> {
    let techs = Technologies::builtin()?;
    debug!("Loaded {} built-in technologies", techs.len());
    match &options.command {
        Command::List => list(&techs),
        Command::Show { tech } => show(techs.require(tech)?),
        Command::Rules { tech } => rules(techs.require(tech)?),
        Command::Export { tech, out, fmt } => {
            let fmt = parse_format(fmt, out)?;
            techs.save(tech, out, fmt)?;
            Ok(format!("wrote {}\n", out))
        }
        Command::Check { file, fmt } => {
            let fmt = parse_format(fmt, file)?;
            let tech = Technology::load(file, fmt)?;
            let s = tech.summary();
            info!("Technology file {} is valid", file);
            Ok(format!(
                "{}: {} layers, {} arcs, {} nodes, {} rules\n",
                s.name, s.layers, s.arcs, s.nodes, s.rules
            ))
        }
    }
}

/// Parse `fmt` into a [SerializationFormat], falling back to the extension of `path`
fn parse_format(fmt: &str, path: &str) -> Result<SerializationFormat, Box<dyn Error>> {
    if fmt.is_empty() {
        return SerializationFormat::from_path(path)
            .ok_or_else(|| format!("Cannot infer a format from {}. Use `--fmt`.", path).into());
    }
    SerializationFormat::from_name(fmt).ok_or_else(|| {
        format!("Invalid format: {}. Must be one of (json, yaml, toml).", fmt).into()
    })
}

fn list(techs: &Technologies) -> Result<String, Box<dyn Error>> {
    let mut s = String::new();
    for tech in techs.iter() {
        let sum = tech.summary();
        writeln!(
            s,
            "{:<10} {:>3} layers {:>3} arcs {:>3} nodes  {}",
            sum.name, sum.layers, sum.arcs, sum.nodes, sum.description
        )?;
    }
    Ok(s)
}

fn show(tech: &Technology) -> Result<String, Box<dyn Error>> {
    let mut s = String::new();
    writeln!(s, "{} ({})", tech.name, tech.description)?;
    writeln!(
        s,
        "scale: {} nm per lambda{}",
        tech.scale.to_nanometers(),
        if tech.scale.relevant { "" } else { " (nominal)" }
    )?;
    writeln!(s, "layers:")?;
    for (idx, (_, layer)) in tech.layers.iter().enumerate() {
        let extras = layer.all_extras().names().join(",");
        writeln!(
            s,
            "  {:>2} {:<20} {:<14} {:<12} {}",
            idx,
            layer.name,
            layer.function.to_str(),
            extras,
            layer.graphics.color
        )?;
    }
    writeln!(s, "arcs:")?;
    for (_, arc) in tech.arcs.iter() {
        writeln!(
            s,
            "  {:<22} {:<14} width {}",
            arc.name,
            arc.function.to_str(),
            arc.default_width
        )?;
    }
    writeln!(s, "nodes:")?;
    for (_, node) in tech.nodes.iter() {
        let ports: Vec<&str> = node.ports.iter().map(|p| p.name.as_str()).collect();
        writeln!(
            s,
            "  {:<24} {:<18} {}x{}  [{}]",
            node.name,
            node.function.to_str(),
            node.default_width,
            node.default_height,
            ports.join(", ")
        )?;
    }
    Ok(s)
}

fn rules(tech: &Technology) -> Result<String, Box<dyn Error>> {
    let rules = match &tech.rules {
        Some(r) => r,
        None => return Ok(format!("{} has no design rules\n", tech.name)),
    };
    let name = |idx| tech.layers.at(idx).map_or("?", |l| l.name.as_str());
    let mut s = String::new();
    for (i, j, dist) in rules.unconnected.iter() {
        writeln!(s, "{:<20} {:<20} {}", name(i), name(j), dist)?;
    }
    writeln!(s, "worst spacing: {}", tech.worst_spacing_distance())?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tech21::technologies;

    fn run(command: Command) -> Result<String, Box<dyn Error>> {
        _main(&ProgramOptions {
            command,
            verbose: false,
        })
    }

    #[test]
    fn list_builtins() -> Result<(), Box<dyn Error>> {
        let out = run(Command::List)?;
        assert_eq!(out.lines().count(), technologies::BUILTIN_NAMES.len());
        assert!(out.contains("cmos"));
        Ok(())
    }

    #[test]
    fn show_and_rules() -> Result<(), Box<dyn Error>> {
        let out = run(Command::Show { tech: "CMOS".into() })?;
        assert!(out.contains("Metal-Polysilicon-Con"));
        let out = run(Command::Rules { tech: "cmos".into() })?;
        assert!(out.contains("worst spacing: 5"));
        let out = run(Command::Rules { tech: "efido".into() })?;
        assert_eq!(out, "efido has no design rules\n");
        assert!(run(Command::Show { tech: "nmos".into() }).is_err());
        Ok(())
    }

    #[test]
    fn export_and_check() -> Result<(), Box<dyn Error>> {
        let path = std::env::temp_dir().join("techinfo_artwork.json");
        let out = path.to_string_lossy().to_string();
        run(Command::Export {
            tech: "artwork".into(),
            out: out.clone(),
            fmt: "".into(),
        })?;
        let report = run(Command::Check {
            file: out,
            fmt: "json".into(),
        })?;
        assert_eq!(report, "artwork: 1 layers, 4 arcs, 17 nodes, 0 rules\n");
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn export_and_check_toml() -> Result<(), Box<dyn Error>> {
        for tech in technologies::BUILTIN_NAMES {
            let path = std::env::temp_dir().join(format!("techinfo_{}.toml", tech));
            let out = path.to_string_lossy().to_string();
            run(Command::Export {
                tech: tech.into(),
                out: out.clone(),
                fmt: "".into(),
            })?;
            let report = run(Command::Check {
                file: out,
                fmt: "".into(),
            })?;
            assert!(report.starts_with(&format!("{}: ", tech)));
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    #[test]
    fn formats() {
        assert!(parse_format("", "tech.yml").is_ok());
        assert!(parse_format("toml", "tech").is_ok());
        assert!(parse_format("", "tech").is_err());
        assert!(parse_format("xml", "tech.yaml").is_err());
    }
}
