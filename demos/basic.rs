//! Basic example demonstrating the Interacta API client.
//!
//! Run with:
//! ```
//! INTERACTA_BASE_URL=https://interacta.example.org \
//! INTERACTA_USERNAME=me INTERACTA_PASSWORD=secret \
//! cargo run --example basic -- 1142
//! ```

use interactapi::{
    find_group_by_name, Comment, Get, Hashtag, InteractaClient, InteractaError, List, Pagination,
    Post, PostDefinition, PostDetail, PostListQuery,
};

#[tokio::main]
async fn main() -> interactapi::Result<()> {
    tracing_subscriber::fmt::init();

    let community_id: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .ok_or_else(|| InteractaError::Config("usage: basic <community-id>".to_string()))?;

    println!("Creating Interacta client...");
    let mut client = InteractaClient::from_env()?;
    client.login().await?;
    println!("Logged in to: {}", client.base_url());

    // Post definition: which custom fields a post carries
    println!("\n--- Post definition ---");
    let definition = PostDefinition::get(&client, community_id).await?;
    for field in &definition.field_definitions {
        println!(
            "  {} {:?} ({} enum values)",
            field.id,
            field.label,
            field.enum_values.len()
        );
    }

    // First page of posts
    println!("\n--- Listing posts (first page) ---");
    let page = Post::list_page(&client, community_id, &PostListQuery::default()).await?;
    println!(
        "Found {} posts (total: {:?})",
        page.len(),
        page.total_items_count
    );
    for post in page.iter().take(5) {
        println!("  #{} {}", post.id, post.title);
    }

    // Detail and comments of the first post
    if let Some(first) = page.iter().next() {
        println!("\n--- Post #{} ---", first.id);
        let detail = PostDetail::get(&client, first.id).await?;
        println!("  State: {:?}", detail.workflow_state_description);
        println!("  Watchers: {}", detail.watcher_users.len());

        let comments = Comment::list_all(&client, first.id, &Pagination::default()).await?;
        println!("  Comments: {}", comments.len());
    }

    // Hashtags of the community
    println!("\n--- Hashtags ---");
    let hashtags = Hashtag::list_all(&client, community_id, &Pagination::default()).await?;
    for hashtag in &hashtags {
        println!("  #{}", hashtag.name);
    }

    // Group lookup
    match find_group_by_name(&client, "Administrators", None).await {
        Ok(group) => println!("\nAdministrators group: {}", group.id),
        Err(e) => println!("\nNo administrators group: {e}"),
    }

    println!("\nDone!");
    Ok(())
}
