#![deny(clippy::all)]
use color_eyre::eyre::Result;
use log::{error, info};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;
use wpdl_cli::cli::{extra::resolve_site, Cli};
use wpdl_cli::error::CliError;
use wpdl_cli::progress_bars::IndicatifProgressHandler;
use wpdl_cli::scan::{dry_run_plan, scan_posts, ScanResult};
use wpdl_common::error::SiteUrlError;
use wpdl_common::ImageDescriptor;
use wpdl_core::progress::SharedProgressListener;
use wpdl_core::queue::{DownloadReport, Queue};
use wpdl_core::display_output_path;
use wpdl_extractors::prelude::{ImageScanner, WordPressExtractor};

use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    color_eyre::install()?;

    // Every failure ends here: report it and exit normally.
    if let Err(report) = run(args).await {
        error!("{report:?}");
        println!("{} {}", "An error occurred:".red().bold(), report);
    }

    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    let settings = args.settings()?;
    let site = match resolve_site(args.site.as_deref()) {
        Ok(site) => site,
        Err(CliError::InvalidSite {
            source: SiteUrlError::Empty,
        }) => {
            println!("{}", SiteUrlError::Empty.red());
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    println!(
        "{} {}",
        "Starting content image download from:".bold(),
        site.bold().blue()
    );

    let extractor = WordPressExtractor::new(site.clone(), settings.fetch.clone())?;

    println!("Fetching posts from {}...", site.blue());
    let posts = extractor
        .fetch_all_posts(|page, count| {
            println!(
                "Retrieved {} posts from page {}",
                count.to_string().bold().blue(),
                page
            )
        })
        .await;
    println!(
        "{} {}",
        "Total posts retrieved:".bold(),
        posts.len().to_string().bold().blue()
    );

    if posts.is_empty() {
        println!("{}", "No posts found. Check your WordPress site URL.".yellow());
        return Ok(());
    }

    let scanner = ImageScanner::new(site.clone(), Arc::new(extractor.clone()));

    println!("{}", "Extracting images from post content...".bold());
    let ScanResult { found, unique } =
        scan_posts(&scanner, &posts, |summary| println!("{summary}")).await;

    println!(
        "\n{} {}\n{} {}",
        "Total images found:".bold(),
        found.to_string().bold().blue(),
        "Unique images:".bold(),
        unique.len().to_string().bold().blue()
    );

    if unique.is_empty() {
        println!("{}", "No images found in post content.".yellow());
        return Ok(());
    }

    if args.dry_run {
        print_plan(&unique);
        return Ok(());
    }

    println!("\nStarting download of {} images...", unique.len());
    info!("Saving images into {}", settings.output.display());

    let progress_handler: SharedProgressListener =
        Arc::new(IndicatifProgressHandler::new(unique.len() as u64));
    let mut queue = Queue::new(
        settings.download.client(&settings.fetch.user_agent)?,
        settings.output,
        settings.download,
        Some(progress_handler),
    );

    let report = queue.download_all(&unique).await?;
    print_results(&report, queue.output_dir());

    Ok(())
}

fn print_plan(images: &[ImageDescriptor]) {
    println!("\n{}", "Dry run, nothing will be downloaded:".bold().yellow());
    for (name, url) in dry_run_plan(images) {
        println!("{:<40} {} {}", name.bold().green(), "<-".dimmed(), url);
    }
}

fn print_results(report: &DownloadReport, output_dir: &Path) {
    println!("\n\n{}", "Download complete!".bold().green());
    println!(
        "{} {}",
        "Successful:".bold(),
        report.successful.to_string().bold().blue()
    );
    if report.skipped > 0 {
        println!(
            "{} {}",
            "  of which already present:".dimmed(),
            report.skipped.to_string().dimmed()
        );
    }
    println!(
        "{} {}",
        "Failed:".bold(),
        report.failed.to_string().bold().red()
    );
    println!(
        "{} {}",
        "Images saved to:".bold(),
        display_output_path(output_dir).bold().blue().underline()
    );
}
