//! Subcommands of the `socialnet` binary.
//!
//! Each command builds the screen's view model, performs the action and
//! prints the resulting state.

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Subcommand;

use crate::app::App;
use crate::models::{RegisterRequest, ReportStatus, ReportTarget};
use crate::render;
use crate::routes::Route;
use crate::views::{
    AdminView, FeedView, FriendsView, GroupsView, LoginView, MessagesView, NotificationsPanel,
    PostCard, ProfileView, RegisterView, SettingsView, UserSearch,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        email: String,
        username: String,
        password: String,
        #[arg(long, default_value = "")]
        full_name: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the feed
    Feed,
    #[command(subcommand)]
    Post(PostCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Search users by name
    Search { query: String },
    #[command(subcommand)]
    Friends(FriendsCommand),
    #[command(subcommand)]
    Messages(MessagesCommand),
    Groups {
        #[command(subcommand)]
        command: GroupsCommand,
    },
    #[command(subcommand)]
    Notifications(NotificationsCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    Create { content: String },
    Edit { id: i64, content: String },
    Delete { id: i64 },
    /// Toggle like on a post
    Like { id: i64 },
    Comments { id: i64 },
    Comment { id: i64, content: String },
    /// Report a post, or with --comment one of its comments
    Report {
        id: i64,
        reason: String,
        #[arg(long)]
        comment: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show { id: Option<i64> },
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FriendsCommand {
    List,
    Pending,
    Request { user_id: i64 },
    Accept { request_id: i64 },
    Block { request_id: i64 },
    /// Start a conversation with a friend
    Message { user_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum MessagesCommand {
    List,
    Open { conversation_id: i64 },
    Send { conversation_id: i64, body: String },
}

#[derive(Subcommand, Debug)]
pub enum GroupsCommand {
    List,
    Create {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Join { id: i64 },
    Leave { id: i64 },
    Posts { id: i64 },
    Post { id: i64, content: String },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    List,
    Unread,
    Read { id: i64 },
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Reports {
        #[arg(long, default_value = "pending")]
        status: ReportStatus,
    },
    Review { id: i64, status: ReportStatus },
    /// Delete the content behind a report
    Delete {
        id: i64,
        #[arg(long, default_value = "pending")]
        status: ReportStatus,
    },
}

pub async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let mut view = LoginView::new(email, password);
            match view.submit(app).await {
                Some(route) => println!("Signed in. Now at {}", route),
                None => bail!(view.error.unwrap_or_default()),
            }
        }
        Command::Register {
            email,
            username,
            password,
            full_name,
        } => {
            let mut view = RegisterView::new(RegisterRequest {
                email,
                username,
                password,
                full_name,
            });
            match view.submit(app).await {
                Some(route) => println!("Account created. Now at {}", route),
                None => bail!(view.error.unwrap_or_default()),
            }
        }
        Command::Logout => {
            app.logout()?;
            println!("Signed out");
        }
        Command::Whoami => match app.session.user() {
            Some(user) => {
                println!("{} (@{}) #{}", render::display_name(Some(&user)), user.username, user.id);
                if user.is_admin {
                    println!("admin");
                }
            }
            None => println!("Not signed in"),
        },
        Command::Feed => {
            guard(app, Route::Feed)?;
            let mut feed = FeedView::new();
            feed.load(app).await?;
            print_feed(&feed);
        }
        Command::Post(cmd) => run_post(app, cmd).await?,
        Command::Profile(cmd) => run_profile(app, cmd).await?,
        Command::Search { query } => {
            guard(app, Route::Feed)?;
            let mut search = UserSearch::new();
            search.set_query(app, &query).await;
            for user in &search.results {
                println!("#{:<5} {} (@{})", user.id, render::display_name(Some(user)), user.username);
            }
        }
        Command::Friends(cmd) => run_friends(app, cmd).await?,
        Command::Messages(cmd) => run_messages(app, cmd).await?,
        Command::Groups { command } => run_groups(app, command).await?,
        Command::Notifications(cmd) => run_notifications(app, cmd).await?,
        Command::Admin(cmd) => run_admin(app, cmd).await?,
    }
    Ok(())
}

/// Refuse to run a command whose screen the guards would not show.
fn guard(app: &App, route: Route) -> anyhow::Result<()> {
    let landed = app.nav.navigate(route.clone());
    if landed != route {
        bail!("{} is not available; sign in first (now at {})", route, landed);
    }
    Ok(())
}

fn print_card(card: &PostCard) {
    let now = Utc::now();
    println!(
        "[{}] {} · {}",
        card.post.id,
        render::display_name(card.post.author.as_ref()),
        render::relative_time(card.post.created_at, now)
    );
    println!("  {}", card.post.content);
    println!(
        "  {} {}",
        if card.liked { "♥" } else { "♡" },
        card.like_count
    );
}

fn print_feed(feed: &FeedView) {
    if feed.cards.is_empty() {
        println!("No posts yet");
    }
    for card in &feed.cards {
        print_card(card);
    }
}

async fn feed_with_post(app: &App, id: i64) -> anyhow::Result<FeedView> {
    let mut feed = FeedView::new();
    feed.load(app).await?;
    if feed.card(id).is_none() {
        let post = app.api.get_post(id).await?;
        feed.prepend(post);
    }
    Ok(feed)
}

async fn run_post(app: &App, cmd: PostCommand) -> anyhow::Result<()> {
    guard(app, Route::Feed)?;
    match cmd {
        PostCommand::Create { content } => {
            let mut feed = FeedView::new();
            feed.draft = content;
            let post = feed.submit_post(app).await?;
            println!("Posted #{}", post.id);
        }
        PostCommand::Edit { id, content } => {
            let mut feed = feed_with_post(app, id).await?;
            feed.edit_post(app, id, &content).await?;
            println!("Updated #{}", id);
        }
        PostCommand::Delete { id } => {
            let mut feed = feed_with_post(app, id).await?;
            feed.delete_post(app, id).await?;
            println!("Deleted #{}", id);
        }
        PostCommand::Like { id } => {
            let mut feed = feed_with_post(app, id).await?;
            let card = feed.card_mut(id).context("post not found")?;
            card.toggle_like(app).await?;
            print_card(card);
        }
        PostCommand::Comments { id } => {
            let mut card = PostCard::new(app.api.get_post(id).await?);
            card.toggle_comments(app).await?;
            let now = Utc::now();
            for comment in &card.comments {
                println!(
                    "{} · {}: {}",
                    render::display_name(comment.author.as_ref()),
                    render::relative_time(comment.created_at, now),
                    comment.content
                );
            }
        }
        PostCommand::Comment { id, content } => {
            let mut card = PostCard::new(app.api.get_post(id).await?);
            card.comment_draft = content;
            card.add_comment(app).await?;
            println!("Commented on #{}", id);
        }
        PostCommand::Report { id, reason, comment } => {
            let mut card = PostCard::new(app.api.get_post(id).await?);
            let (target, target_id) = match comment {
                Some(comment_id) => (ReportTarget::Comment, comment_id),
                None => (ReportTarget::Post, id),
            };
            card.report(app, target, target_id, &reason).await?;
            println!("Reported {} #{}", target, target_id);
        }
    }
    Ok(())
}

async fn run_profile(app: &App, cmd: ProfileCommand) -> anyhow::Result<()> {
    match cmd {
        ProfileCommand::Show { id } => {
            let me = app.require_user()?;
            let id = id.unwrap_or(me.id);
            guard(app, Route::Profile(id))?;
            let mut view = ProfileView::new(id);
            if view.load(app).await.is_err() {
                bail!(view.error.unwrap_or_default());
            }
            if let Some(user) = &view.user {
                println!("{} (@{})", render::display_name(Some(user)), user.username);
                if !user.bio.is_empty() {
                    println!("{}", user.bio);
                }
                if view.is_own(app) {
                    println!("(you)");
                }
            }
        }
        ProfileCommand::Update {
            full_name,
            bio,
            avatar_url,
        } => {
            guard(app, Route::Settings)?;
            let mut view = SettingsView::new(app);
            view.edit(|form| {
                if let Some(v) = full_name {
                    form.full_name = v;
                }
                if let Some(v) = bio {
                    form.bio = v;
                }
                if let Some(v) = avatar_url {
                    form.avatar_url = v;
                }
            });
            view.submit(app).await?;
            println!("Profile saved");
        }
    }
    Ok(())
}

async fn run_friends(app: &App, cmd: FriendsCommand) -> anyhow::Result<()> {
    guard(app, Route::Friends)?;
    let mut view = FriendsView::new();
    match cmd {
        FriendsCommand::List => {
            view.load(app).await?;
            for friend in &view.friends {
                println!("#{:<5} {}", friend.id, render::display_name(Some(friend)));
            }
        }
        FriendsCommand::Pending => {
            view.load(app).await?;
            for request in &view.pending {
                println!(
                    "request #{:<5} from {}",
                    request.id,
                    render::display_name(request.requester.as_ref())
                );
            }
        }
        FriendsCommand::Request { user_id } => {
            view.send_request(app, user_id).await?;
            println!("Friend request sent");
        }
        FriendsCommand::Accept { request_id } => {
            view.load(app).await?;
            view.accept(app, request_id).await?;
            println!("Accepted. {} friends", view.friends.len());
        }
        FriendsCommand::Block { request_id } => {
            view.load(app).await?;
            view.block(app, request_id).await?;
            println!("Blocked");
        }
        FriendsCommand::Message { user_id } => {
            view.load(app).await?;
            let friend = view
                .friends
                .iter()
                .find(|f| f.id == user_id)
                .cloned()
                .with_context(|| format!("user {} is not a friend", user_id))?;
            let route = view.message(app, &friend).await?;
            if let Route::Messages(Some(target)) = route {
                println!("Conversation #{}", target.conversation_id);
            }
        }
    }
    Ok(())
}

async fn run_messages(app: &App, cmd: MessagesCommand) -> anyhow::Result<()> {
    guard(app, Route::Messages(None))?;
    let mut view = MessagesView::new();
    view.load(app).await?;
    match cmd {
        MessagesCommand::List => {
            if view.conversations.is_empty() {
                println!("No conversations yet");
            }
            for conv in &view.conversations {
                println!(
                    "#{:<5} {}: {}",
                    conv.id,
                    render::display_name(conv.participant.as_ref()),
                    render::conversation_preview(conv)
                );
            }
        }
        MessagesCommand::Open { conversation_id } => {
            open(app, &mut view, conversation_id).await?;
            print_thread(app, &view);
        }
        MessagesCommand::Send {
            conversation_id,
            body,
        } => {
            open(app, &mut view, conversation_id).await?;
            view.draft = body;
            view.send(app).await?;
            print_thread(app, &view);
        }
    }
    Ok(())
}

async fn open(app: &App, view: &mut MessagesView, conversation_id: i64) -> anyhow::Result<()> {
    let target = crate::routes::ConversationTarget {
        conversation_id,
        participant: None,
    };
    view.open_target(app, &target).await?;
    Ok(())
}

fn print_thread(app: &App, view: &MessagesView) {
    let me = app.session.user();
    for msg in &view.messages {
        let who = if MessagesView::is_own(msg, me.as_ref()) {
            "me".to_string()
        } else {
            render::display_name(view.active.as_ref().and_then(|c| c.participant.as_ref()))
        };
        println!("[{}] {}: {}", render::clock_time(msg.created_at), who, msg.body);
    }
}

async fn run_groups(app: &App, cmd: GroupsCommand) -> anyhow::Result<()> {
    guard(app, Route::Groups)?;
    let mut view = GroupsView::new();
    match cmd {
        GroupsCommand::List => {
            view.load(app).await?;
            if view.groups.is_empty() {
                println!("No groups yet");
            }
            for group in &view.groups {
                println!(
                    "#{:<5} {} ({} members){}",
                    group.id,
                    group.title,
                    group.member_count,
                    if group.is_member { " ✓" } else { "" }
                );
                println!("       {}", render::group_description(group));
            }
        }
        GroupsCommand::Create { title, description } => {
            view.show_create = true;
            view.new_group.title = title;
            view.new_group.description = description;
            let group = view.create_group(app).await?;
            println!("Created group #{}", group.id);
        }
        GroupsCommand::Join { id } => {
            view.load(app).await?;
            view.join(app, id).await?;
            println!("Joined #{}", id);
        }
        GroupsCommand::Leave { id } => {
            view.load(app).await?;
            view.leave(app, id).await?;
            println!("Left #{}", id);
        }
        GroupsCommand::Posts { id } => {
            view.toggle_posts(app, id).await;
            let posts = view.posts.get(&id).map(Vec::as_slice).unwrap_or_default();
            if posts.is_empty() {
                println!("No posts yet");
            }
            for post in posts {
                println!(
                    "{} · {}: {}",
                    render::display_name(post.author.as_ref()),
                    render::timestamp(post.created_at),
                    post.content
                );
            }
        }
        GroupsCommand::Post { id, content } => {
            view.set_draft(id, content);
            let post = view.create_post(app, id).await?;
            println!("Posted #{} in group #{}", post.id, id);
        }
    }
    Ok(())
}

async fn run_notifications(app: &App, cmd: NotificationsCommand) -> anyhow::Result<()> {
    guard(app, Route::Feed)?;
    let mut panel = NotificationsPanel::new();
    match cmd {
        NotificationsCommand::List => {
            panel.load(app).await?;
            let now = Utc::now();
            for n in &panel.notifications {
                println!(
                    "{} #{:<5} {} · {}",
                    if n.read { " " } else { "•" },
                    n.id,
                    n.message,
                    render::relative_time(n.created_at, now)
                );
            }
            println!("{} unread", panel.unread_count());
        }
        NotificationsCommand::Unread => {
            println!("{}", panel.fetch_unread_count(app).await?);
        }
        NotificationsCommand::Read { id } => {
            panel.mark_read(app, id).await?;
            println!("Marked #{} as read", id);
        }
        NotificationsCommand::Clear => {
            panel.clear_all(app).await?;
            println!("Notifications cleared");
        }
    }
    Ok(())
}

async fn run_admin(app: &App, cmd: AdminCommand) -> anyhow::Result<()> {
    guard(app, Route::Admin)?;
    let mut view = AdminView::new();
    let result = match cmd {
        AdminCommand::Reports { status } => view.set_status(app, status).await,
        AdminCommand::Review { id, status } => view.review(app, id, status).await,
        AdminCommand::Delete { id, status } => match view.set_status(app, status).await {
            Ok(()) => view.delete_content(app, id).await,
            Err(e) => Err(e),
        },
    };
    if let Err(e) = result {
        bail!(view.error.clone().unwrap_or_else(|| e.to_string()));
    }

    if view.reports.is_empty() {
        println!("No reports with status \"{}\"", view.status);
    }
    for report in &view.reports {
        println!(
            "#{:<5} {} #{} [{}] by {} · {}",
            report.id,
            report.target_type,
            report.target_id,
            report.status,
            render::reporter_label(report),
            render::timestamp(report.created_at)
        );
        println!("       {}", report.reason);
    }
    Ok(())
}
