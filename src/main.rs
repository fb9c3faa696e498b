//! QuoteDesk command line
//!
//! Runs the quote derivations against the backend or a local JSON snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use quotedesk::mocks::FixtureQuoteApi;
use quotedesk::service::{filter_quotes, price_breakdown};
use quotedesk::{
	init_tracing_from_settings, load_config, log_service_info, log_service_shutdown, AppContext,
	EntityId, NoteTab, Quote, QuoteDeskBuilder, QuoteSession, QuoteType,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "quotedesk", version)]
#[command(about = "Inspect broker quotes from the backend or a local snapshot")]
struct Cli {
	/// Quote to load from the backend
	#[arg(long, short = 'q', global = true, value_name = "ID", conflicts_with = "file")]
	quote: Option<String>,

	/// Load the quote from a JSON snapshot instead of the backend
	#[arg(long, short = 'f', global = true, value_name = "PATH")]
	file: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum Command {
	/// Shareable summary text
	Summary,
	/// Age-bracket pricing of every product in the track
	Pricing {
		/// Price the dental track instead of health
		#[arg(long)]
		odonto: bool,
	},
	/// Plan notes under a tab (discount, grace-period, ...)
	Notes { tab: NoteTab },
	/// Sales-area matrix, optionally filtered by city
	Cities { query: Option<String> },
	/// Quotes matching a client name or slug
	List { query: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
	Remote(EntityId),
	File(PathBuf),
	Listing,
}

impl Cli {
	/// Where the quote comes from; only `list` works without one
	fn source(&self) -> Option<Source> {
		match (&self.file, &self.quote, &self.command) {
			(Some(path), _, _) => Some(Source::File(path.clone())),
			(None, Some(id), _) => Some(Source::Remote(EntityId::from(id.trim()))),
			(None, None, Command::List { .. }) => Some(Source::Listing),
			(None, None, _) => None,
		}
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	let source = match cli.source() {
		Some(source) => source,
		None => Cli::command()
			.error(
				ErrorKind::MissingRequiredArgument,
				"a quote is required: pass --quote <ID> or --file <PATH>",
			)
			.exit(),
	};

	let settings = load_config().unwrap_or_default();
	init_tracing_from_settings(&settings)?;
	log_service_info(&settings);

	let mut builder = QuoteDeskBuilder::new().with_settings(settings);
	let quote_id = match &source {
		Source::File(path) => {
			let quote = Quote::from_json(&std::fs::read_to_string(path)?)?;
			info!("Loaded quote {} from {}", quote.id, path.display());
			let id = quote.id.clone();
			builder = builder.with_api(Arc::new(FixtureQuoteApi::new().with_quote(quote)));
			Some(id)
		},
		Source::Remote(id) => Some(id.clone()),
		Source::Listing => None,
	};
	let context = builder.build().await?;

	let output = match (&cli.command, quote_id) {
		(Command::List { query }, _) => {
			let quotes = context.actions().list_quotes().await?;
			filter_quotes(&quotes, query.as_deref().unwrap_or(""))
				.iter()
				.map(|item| {
					format!(
						"{}\t{}\t{}",
						item.id,
						item.slug,
						item.client_name.as_deref().unwrap_or("-")
					)
				})
				.collect::<Vec<_>>()
				.join("\n")
		},
		(command, Some(quote_id)) => {
			let session = context.open_quote(&quote_id).await?;
			render(&context, session, command).await
		},
		(_, None) => return Err("missing quote id".into()),
	};

	println!("{}", output);
	log_service_shutdown();
	Ok(())
}

async fn render(context: &AppContext, mut session: QuoteSession, command: &Command) -> String {
	match command {
		Command::Summary => context.share_message(&session).await,
		Command::Pricing { odonto } => {
			let requested = if *odonto {
				QuoteType::Odonto
			} else {
				QuoteType::Health
			};
			let track = session.set_active_type(requested);
			let mut blocks = vec![format!("*{}*", track.section_title())];
			for selected in session.products() {
				let breakdown = price_breakdown(&session.quote().headcounts, selected.product);
				blocks.push(format!(
					"{} / {}\n{}",
					selected.plan.name,
					selected.product.name,
					breakdown.render()
				));
			}
			blocks.join("\n\n")
		},
		Command::Notes { tab } => {
			let mut blocks = Vec::new();
			for track in session.available_types() {
				session.set_active_type(track);
				for entry in session.notes(*tab) {
					let mut block = format!(
						"## {} ({})\n{}",
						entry.plan.name,
						track.label(),
						entry.text.to_plain_text()
					);
					for link in &entry.links {
						block.push_str(&format!("\n-> {}", link));
					}
					blocks.push(block);
				}
			}
			if blocks.is_empty() {
				format!("Nenhuma informação em {}", tab.title())
			} else {
				blocks.join("\n\n")
			}
		},
		Command::Cities { query } => {
			let matrix = session.sales_area();
			let matrix = match query {
				Some(query) => matrix.filter(query),
				None => matrix,
			};
			let header: Vec<&str> = matrix
				.products()
				.iter()
				.map(|selected| selected.product.name.as_str())
				.collect();
			let mut lines = vec![format!("Cidade\t{}", header.join("\t"))];
			for (city, cells) in matrix.rows() {
				let marks: Vec<&str> = cells
					.iter()
					.map(|served| if *served { "x" } else { "-" })
					.collect();
				lines.push(format!("{}\t{}", city.name, marks.join("\t")));
			}
			lines.join("\n")
		},
		Command::List { .. } => String::new(),
	}
}
