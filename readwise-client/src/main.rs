//! readwise - terminal front end for the Readwise client flows
//!
//! Drives the onboarding wizard, home feed, search, discovery, likes, threads
//! and profile against a live backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use readwise_client::actions::LikeToggle;
use readwise_client::cards::Card;
use readwise_client::discover::DiscoverView;
use readwise_client::feed::{FeedPipeline, HomeFeed, HomeInit};
use readwise_client::onboarding::{enter_onboarding, OnboardingEntry};
use readwise_client::profile::ProfileView;
use readwise_client::search::{SearchFilters, SearchView};
use readwise_client::thread_view::ThreadView;
use readwise_client::{ApiClient, Backend, Session, StaticSession};
use readwise_common::avatar::AvatarDescriptor;
use readwise_common::config::ClientConfig;
use readwise_common::events::{ClientEvent, EventBus, ToastLevel};
use readwise_common::models::{LikeRequest, SearchSort};
use readwise_common::route::PostKindTag;
use readwise_common::{Identity, RefId};
use tokio::sync::broadcast;
use tracing::info;

/// Command-line arguments for readwise
#[derive(Parser, Debug)]
#[command(name = "readwise")]
#[command(about = "Terminal client for the Readwise book discovery service")]
#[command(version)]
struct Args {
    /// Backend origin (overrides READWISE_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Config file path (overrides READWISE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Signed-in user id; omit to act as a signed-out visitor
    #[arg(long, env = "READWISE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the home recommendation feed
    Feed {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Check whether the user completed onboarding
    OnboardStatus,
    /// Complete onboarding in one go
    Onboard {
        #[arg(long)]
        name: String,
        /// Interest tag (repeatable)
        #[arg(long = "interest", required = true)]
        interests: Vec<String>,
        /// Author id to follow (repeatable)
        #[arg(long = "author")]
        authors: Vec<String>,
        /// Seed for the generated avatar
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search books
    Search {
        query: String,
        #[arg(long)]
        genres: Option<String>,
        #[arg(long)]
        year_min: Option<i32>,
        #[arg(long)]
        year_max: Option<i32>,
        /// relevance, rating, year_desc, year_asc or title
        #[arg(long, default_value = "relevance")]
        sort: String,
    },
    /// Show diversified recommendations
    Discover,
    /// Toggle the like on a post
    Like {
        /// thread, review or book
        kind: String,
        post_id: String,
        book_id: String,
    },
    /// Show a post and its comments
    Comments {
        /// `<kind>_<id>`, e.g. review_65f0
        post: String,
        /// Post a comment before listing
        #[arg(long)]
        reply: Option<String>,
    },
    /// Show a profile (defaults to the signed-in user)
    Profile {
        #[arg(long)]
        id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ClientConfig::resolve(args.config.as_deref(), args.api_url.as_deref())
        .context("Failed to resolve configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting readwise v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Backend: {}", config.api_base_url);

    let session: Arc<StaticSession> = Arc::new(match &args.user {
        Some(user) => StaticSession::signed_in(user.clone()),
        None => StaticSession::signed_out(),
    });
    let client = ApiClient::new(&config)
        .context("Failed to build HTTP client")?
        .with_credential(session.credential());
    let backend: Arc<dyn Backend> = Arc::new(client);

    let events = EventBus::default();
    let printer = tokio::spawn(print_events(events.subscribe()));

    let outcome = run(args.command, &config, backend, session, &events).await;

    drop(events);
    let _ = printer.await;
    outcome
}

async fn print_events(mut rx: broadcast::Receiver<ClientEvent>) {
    loop {
        match rx.recv().await {
            Ok(ClientEvent::Toast {
                level: ToastLevel::Success,
                message,
            }) => eprintln!("✓ {}", message),
            Ok(ClientEvent::Toast {
                level: ToastLevel::Error,
                message,
            }) => eprintln!("✗ {}", message),
            Ok(ClientEvent::Navigate { route }) => eprintln!("→ {}", route),
            Ok(ClientEvent::FeedUpdated { .. }) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn run(
    command: Command,
    config: &ClientConfig,
    backend: Arc<dyn Backend>,
    session: Arc<StaticSession>,
    events: &EventBus,
) -> Result<()> {
    match command {
        Command::Feed { pages } => {
            let pipeline = FeedPipeline::new(Arc::clone(&backend), config.feed_page_size);
            let feed = HomeFeed::new(pipeline, session, events.clone());

            match feed.initialize().await {
                HomeInit::Ready => {}
                HomeInit::Wait => bail!("Session still loading"),
                HomeInit::Redirect(route) => {
                    println!("Redirected to {}", route);
                    return Ok(());
                }
            }
            for _ in 1..pages {
                if !feed.snapshot().await.has_more {
                    break;
                }
                feed.load_more().await?;
            }

            let snapshot = feed.snapshot().await;
            if let Some(error) = &snapshot.status.error {
                bail!("{}", error);
            }
            for post in &snapshot.posts {
                println!("{}\n", Card::from_post(post));
            }
            if let Some(message) = snapshot.empty_message().or(snapshot.end_message()) {
                println!("{}", message);
            }
        }

        Command::OnboardStatus => {
            let user = session.require_identity()?;
            let onboarded = backend.onboard_status(&user).await?;
            println!("{}: onboarded = {}", user, onboarded);
        }

        Command::Onboard {
            name,
            interests,
            authors,
            seed,
        } => {
            let avatar = match seed {
                Some(seed) => AvatarDescriptor::generate(&mut StdRng::seed_from_u64(seed)),
                None => AvatarDescriptor::random(),
            };
            let mut wizard = match enter_onboarding(session.as_ref(), backend.as_ref(), events, avatar).await {
                OnboardingEntry::Start(wizard) => wizard,
                OnboardingEntry::Redirect(route) => {
                    println!("Redirected to {}", route);
                    return Ok(());
                }
                OnboardingEntry::Wait => bail!("Session still loading"),
            };

            wizard.set_name(name);
            wizard.next()?;
            for interest in &interests {
                wizard.toggle_interest(interest)?;
            }
            wizard.next()?;
            for author in &authors {
                wizard.toggle_author(author)?;
            }
            wizard.next()?;

            let route = wizard.complete(backend.as_ref(), events).await?;
            println!("Onboarding complete, continue at {}", route);
        }

        Command::Search {
            query,
            genres,
            year_min,
            year_max,
            sort,
        } => {
            let sort: SearchSort = sort.parse()?;
            let view = SearchView::new(
                backend,
                events.clone(),
                config.search_page_size,
                config.search_debounce(),
            );
            view.set_filters(SearchFilters {
                genres,
                year_min,
                year_max,
                sort,
            })
            .await;
            view.set_text(query).await;
            view.search_now().await?;

            let snapshot = view.snapshot().await;
            for book in &snapshot.books {
                println!("[{}] {} ({})", book.book_id, book.title, book.authors_names.join(", "));
            }
            match snapshot.empty_message() {
                Some(message) => println!("{}", message),
                None => println!("{} of {} results", snapshot.books.len(), snapshot.total),
            }
        }

        Command::Discover => {
            let view = DiscoverView::new(backend, session, events.clone(), config.discover_page_size);
            view.load().await?;

            let snapshot = view.snapshot().await;
            for book in &snapshot.books {
                let mut marks = String::new();
                if snapshot.library.is_rented(&book.book_id) {
                    marks.push_str(" [rented]");
                }
                if snapshot.library.is_purchased(&book.book_id) {
                    marks.push_str(" [owned]");
                }
                println!("[{}] {}{}", book.book_id, book.title, marks);
            }
            if snapshot.books.is_empty() {
                println!("No recommendations available");
            }
        }

        Command::Like {
            kind,
            post_id,
            book_id,
        } => {
            let user = session.require_identity()?;
            let post_type: PostKindTag = kind.parse()?;
            let toggle = LikeToggle::for_request(
                LikeRequest {
                    user_id: user.to_string(),
                    post_id,
                    post_type,
                    book_id: RefId::parse(&book_id),
                },
                0,
            );
            toggle.refresh(backend.as_ref()).await;
            let state = toggle.toggle(backend.as_ref(), events).await?;
            println!("{}", if state.is_liked { "Liked" } else { "Unliked" });
        }

        Command::Comments { post, reply } => {
            let mut view = ThreadView::load(backend.as_ref(), &post).await?;
            if let Some(text) = reply {
                let user = session.require_identity()?;
                view.reply(backend.as_ref(), &user, &text).await?;
            }

            println!("{}\n", view.card());
            for comment in &view.comments {
                println!("  {}: {}", comment.author.name, comment.text);
            }
            if view.comments.is_empty() {
                println!("  No comments yet");
            }
        }

        Command::Profile { id } => {
            let user = match id {
                Some(id) => Identity::new(id),
                None => session.require_identity()?,
            };
            let view = ProfileView::load(backend.as_ref(), events, &user).await?;
            println!("{}", view.display_name());
            if let Some(bio) = &view.profile.bio {
                println!("{}", bio);
            }
            println!(
                "{} reviews • {} liked posts • {} read • {} rented • {} purchased",
                view.threads.len(),
                view.liked_posts.len(),
                view.book_history.len(),
                view.rentals.len(),
                view.purchases.len()
            );
        }
    }

    Ok(())
}
