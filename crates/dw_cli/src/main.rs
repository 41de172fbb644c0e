use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dw_core::paging::DEFAULT_PAGE_SIZE;
use dw_core::{Result, RuleTable, Session};
use dw_feed::{FeedEndpoint, FeedLoader, LoaderConfig, ARTICLE_FEED_PATH, SPOTLIGHT_FEED_PATH};
use dw_render::{
    build_model_panels, build_page, FeaturedMode, HtmlRenderer, PageConfig, PageRenderer,
    MODEL_PANELS,
};
use tracing::{error, info};
use url::Url;

const LOAD_FAILURE_NOTICE: &str = "Failed to load news. Try again soon.";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page URL the feed paths are resolved against.
    #[arg(long, default_value = "https://fugallo.it/")]
    site: String,
    /// Site-relative path of the article feed.
    #[arg(long, default_value = ARTICLE_FEED_PATH)]
    articles_path: String,
    /// Site-relative path of the model-spotlight feed.
    #[arg(long, default_value = SPOTLIGHT_FEED_PATH)]
    spotlight_path: String,
    /// Absolute article feed URL, bypassing site resolution and fallback.
    #[arg(long)]
    articles_url: Option<String>,
    /// Absolute spotlight feed URL, bypassing site resolution and fallback.
    #[arg(long)]
    spotlight_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load both feeds and emit the page markup.
    Render {
        /// Topic to restrict the page to ("all" for no restriction).
        #[arg(long, default_value = "all")]
        topic: String,
        /// Free-text query to restrict the page to.
        #[arg(long, default_value = "")]
        query: String,
        /// Extra "load more" steps to apply before rendering.
        #[arg(long, default_value_t = 0)]
        more: usize,
        /// Articles revealed per page.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Feature the first N articles as a strip instead of a single lead.
        #[arg(long)]
        top: Option<usize>,
        /// Write the markup here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load one feed and print its normalized articles as JSON.
    Fetch {
        /// Which feed to load: "articles" or "spotlight".
        #[arg(default_value = "articles")]
        feed: String,
    },
    /// Print the classifier's rule table.
    Topics,
}

struct RenderOptions {
    topic: String,
    query: String,
    more: usize,
    page_size: usize,
    top: Option<usize>,
    out: Option<PathBuf>,
}

async fn render(
    loader: &FeedLoader,
    articles: &FeedEndpoint,
    spotlight: &FeedEndpoint,
    opts: RenderOptions,
) -> Result<()> {
    // The two loads are independent: a slow or broken spotlight feed must
    // never hold up the article wall, and vice versa.
    let (main_feed, spotlight_feed) = tokio::join!(loader.load(articles), loader.load(spotlight));

    let renderer = HtmlRenderer;
    let mut output = String::new();

    match main_feed {
        Ok(feed) => {
            if let Some(ts) = &feed.last_updated {
                info!("🕒 articles last updated {ts}");
            }
            let mut session = Session::new(feed.articles).with_page_size(opts.page_size);
            session.set_topic(&opts.topic);
            session.set_query(&opts.query);
            for _ in 0..opts.more {
                if !session.advance_page() {
                    break;
                }
            }
            let config = match opts.top {
                Some(n) => PageConfig {
                    featured: FeaturedMode::Top(n),
                    latest_offset: n,
                    ..PageConfig::default()
                },
                None => PageConfig::default(),
            };
            output.push_str(&renderer.render_page(&build_page(&session, &config)));
        }
        Err(e) => {
            error!("failed to load articles: {e}");
            output.push_str(&renderer.render_notice(LOAD_FAILURE_NOTICE));
        }
    }

    let rules = RuleTable::default();
    let spotlight_articles = match spotlight_feed {
        Ok(feed) => feed.articles,
        Err(e) => {
            // Panels degrade to their empty states; the page stays up.
            error!("failed to load model spotlight: {e}");
            Vec::new()
        }
    };
    output.push_str(&renderer.render_panels(&build_model_panels(
        &spotlight_articles,
        &rules,
        MODEL_PANELS,
    )));

    match opts.out {
        Some(path) => {
            std::fs::write(&path, &output)?;
            info!("📝 wrote {}", path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}

async fn fetch(loader: &FeedLoader, endpoint: &FeedEndpoint) -> Result<()> {
    let feed = loader.load(endpoint).await?;
    info!("📰 {} articles loaded", feed.articles.len());
    println!("{}", serde_json::to_string_pretty(&feed.articles)?);
    Ok(())
}

fn topics() {
    let rules = RuleTable::default();
    for rule in rules.rules() {
        println!("{}\t{}", rule.topic, rule.keywords.join(", "));
    }
    println!("(fallback)\t{}", rules.fallback());
}

fn endpoint_for(
    page: &Url,
    direct: Option<&str>,
    path: &str,
    what: &str,
) -> anyhow::Result<FeedEndpoint> {
    match direct {
        Some(raw) => {
            let url = Url::parse(raw).with_context(|| format!("invalid {what} URL: {raw}"))?;
            Ok(FeedEndpoint::direct(url))
        }
        None => Ok(FeedEndpoint::new(page.clone(), path)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let page = Url::parse(&cli.site).with_context(|| format!("invalid site URL: {}", cli.site))?;
    let loader = FeedLoader::new(&LoaderConfig::from_env())?;
    let articles = endpoint_for(
        &page,
        cli.articles_url.as_deref(),
        &cli.articles_path,
        "articles",
    )?;
    let spotlight = endpoint_for(
        &page,
        cli.spotlight_url.as_deref(),
        &cli.spotlight_path,
        "spotlight",
    )?;

    match cli.command {
        Commands::Render {
            topic,
            query,
            more,
            page_size,
            top,
            out,
        } => {
            render(
                &loader,
                &articles,
                &spotlight,
                RenderOptions {
                    topic,
                    query,
                    more,
                    page_size,
                    top,
                    out,
                },
            )
            .await?;
        }
        Commands::Fetch { feed } => {
            let endpoint = match feed.as_str() {
                "articles" => &articles,
                "spotlight" => &spotlight,
                other => {
                    anyhow::bail!("unknown feed '{other}' (expected \"articles\" or \"spotlight\")")
                }
            };
            fetch(&loader, endpoint).await?;
        }
        Commands::Topics => topics(),
    }

    Ok(())
}
