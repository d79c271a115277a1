use std::env;

use anyhow;

use bookshelf_client::api::{Catalog, Reviews};
use bookshelf_client::detail::{BookDetail, ViewState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let book_id = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("zyTCAlFPjgYC"));

    let catalog = match env::var("CATALOG_BASE") {
        Ok(base) => Catalog::new(base),
        Err(_) => Catalog::default(),
    };

    let store = match env::var("REVIEWS_BASE") {
        Ok(base) => Reviews::new(base),
        Err(_) => Reviews::default(),
    };

    let mut detail = BookDetail::new(catalog, store);
    detail.load(&book_id).await;

    match detail.state() {
        ViewState::Ready { book, rating } => {
            println!("{}", book.title);
            println!("by {}", book.authors.join(", "));
            println!("Published: {}", book.published_date);

            match rating {
                Some(rating) => {
                    println!("Catalog rating: {} ({} votes)", rating.average, rating.count)
                }
                None => println!("No catalog rating."),
            }

            println!();
            println!("{} reader review(s)", detail.reviews().len());
            for review in detail.reviews().reviews() {
                println!("  [{}/5] {}", review.rating, detail.reviews().display_text(review));
            }
        }
        ViewState::Error => println!("The book could not be fetched."),
        ViewState::Loading => {}
    }

    Ok(())
}
