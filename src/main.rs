//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

use tacit::generator;
use tacit::lexer;
use tacit::stdout::{CharSet, ColorChoice, Options, StdOut};

use std::io::Write;

use anyhow::anyhow;
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Default, Deserialize, clap::Parser)]
#[clap(version)]
#[serde(default, deny_unknown_fields)]
struct Cli
{
	/// One or more source files, each analyzed on its own
	#[clap(value_parser, required(true))]
	#[serde(skip)]
	filepaths: Vec<std::path::PathBuf>,

	/// Load additional options from TOML file
	#[clap(long)]
	#[serde(skip)]
	config: Option<std::path::PathBuf>,

	/// Write the three-address code of each file to this directory
	#[clap(long)]
	out_dir: Option<std::path::PathBuf>,

	/// How to print the three-address code (default: tuples)
	#[clap(long, value_enum)]
	format: Option<generator::Format>,

	/// Dump the tokens and the final symbol table of each file
	#[clap(short, long)]
	verbose: bool,

	/// When to use ANSI colors in error messages and generated code
	#[clap(long, value_name("WHEN"), value_enum)]
	color: Option<ColorChoice>,

	/// Which character set to use to draw the arrows in error messages
	#[clap(long, value_name("CHARSET"), value_enum)]
	arrows: Option<CharSet>,
}

fn main() -> Result<(), anyhow::Error>
{
	#[cfg(feature = "logging")]
	env_logger::init();

	let result = do_main();
	if result.is_err()
	{
		let mut stdout =
			StandardStream::stdout(termcolor::ColorChoice::Auto);
		let colorspec_error = ColorSpec::new()
			.set_fg(Some(Color::Red))
			.set_bold(true)
			.to_owned();
		stdout.set_color(&colorspec_error)?;
		writeln!(stdout)?;
	}
	result
}

fn load_config(filename: &std::path::Path) -> Result<Cli, anyhow::Error>
{
	let raw = std::fs::read_to_string(filename).with_context(|| {
		format!("failed to read '{}'", filename.to_string_lossy())
	})?;
	let config = toml::from_str(&raw).with_context(|| {
		format!("failed to parse '{}'", filename.to_string_lossy())
	})?;
	Ok(config)
}

fn do_main() -> Result<(), anyhow::Error>
{
	let args = Cli::parse();
	let config = match &args.config
	{
		Some(filename) => load_config(filename)?,
		None => Cli::default(),
	};
	log::debug!("loaded config {:?}", config);

	// Values given on the command line override those in the config file.
	let options = Options {
		verbose: args.verbose || config.verbose,
		color: args.color.or(config.color).unwrap_or_default(),
		arrows: args.arrows.or(config.arrows).unwrap_or_default(),
	};
	let format = args.format.or(config.format).unwrap_or_default();
	let out_dir = args.out_dir.or(config.out_dir);

	let mut stdout = StdOut::new(&options);
	let mut num_failed = 0;

	for filepath in args.filepaths
	{
		let filename = filepath.to_string_lossy().to_string();
		let source = std::fs::read_to_string(&filepath)
			.with_context(|| format!("failed to read '{}'", filename))?;
		stdout.header("Analyzing", &filename)?;
		if options.verbose
		{
			let tokens = lexer::lex(&source, &filename);
			stdout.dump_tokens(&tokens)?;
		}
		let sources = vec![(filename.clone(), source.clone())];

		let analysis = match tacit::compile_source(&source, &filename)
		{
			Ok(analysis) => analysis,
			Err(errors) =>
			{
				stdout.prepare_for_errors()?;
				stdout.show_errors(errors.iter(), ariadne::sources(sources))?;
				num_failed += 1;
				continue;
			}
		};

		stdout.dump_symbols(analysis.symbols.global_scope())?;
		stdout.dump_instructions(&analysis.instructions, format)?;

		if let Some(out_dir) = &out_dir
		{
			let outputpath = {
				let mut path = out_dir.clone();
				path.push(filepath.file_name().context("invalid filename")?);
				path.set_extension("tac");
				path
			};
			std::fs::create_dir_all(out_dir)?;
			stdout.header("Writing to", &outputpath.to_string_lossy())?;
			let code = generator::render(&analysis.instructions, format);
			std::fs::write(&outputpath, code).with_context(|| {
				format!("failed to write '{}'", outputpath.to_string_lossy())
			})?;
		}

		if analysis.is_clean()
		{
			stdout.success(&filename)?;
		}
		else
		{
			stdout.prepare_for_errors()?;
			stdout.show_errors(
				analysis.diagnostics.iter(),
				ariadne::sources(sources),
			)?;
			num_failed += 1;
		}
	}

	if num_failed > 0
	{
		Err(anyhow!("analysis failed for {} file(s)", num_failed))
	}
	else
	{
		stdout.done()?;
		Ok(())
	}
}
