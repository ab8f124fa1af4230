//! Server-rendered HTML pages
//!
//! Pages are plain HTML strings assembled here and returned through
//! `axum::response::Html`. No client-side code.

use crate::models::Book;

/// Escape text for interpolation into HTML element content or attribute
/// values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<link rel="stylesheet" href="/public/style.css">
</head>
<body>
<main>
{}
</main>
</body>
</html>"#,
        escape(title),
        body
    )
}

pub fn index() -> String {
    layout(
        "Book Log",
        r#"<h1>Book Log</h1>
<p>Keep track of the books you have read, with notes and ratings.</p>
<p><a class="button" href="/books">Browse the log</a></p>"#,
    )
}

pub fn book_list(books: &[Book], degraded: bool) -> String {
    let mut body = String::from("<h1>Books</h1>\n");

    if degraded {
        body.push_str(
            "<p class=\"notice\">Database unavailable. Showing temporary in-memory \
             records; changes will not survive a restart.</p>\n",
        );
    }

    body.push_str("<p><a class=\"button\" href=\"/books/new\">Add a book</a></p>\n");

    if books.is_empty() {
        body.push_str("<p>No books logged yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Cover</th><th>Title</th><th>Author</th>\
             <th>Rating</th><th>Date read</th><th>Review</th><th></th></tr>\n",
        );
        for book in books {
            body.push_str(&book_row(book));
        }
        body.push_str("</table>\n");
    }

    layout("Books", &body)
}

fn book_row(book: &Book) -> String {
    let cover = match &book.cover_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"Cover of {}\">",
            escape(url),
            escape(&book.title)
        ),
        None => String::new(),
    };
    let rating = book
        .rating
        .map(|r| r.to_string())
        .unwrap_or_default();
    let date_read = book
        .date_read
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let review = book.review.as_deref().unwrap_or("");

    format!(
        r#"<tr>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>
<a href="/books/{}/edit">Edit</a>
<form method="post" action="/books/{}/delete"><button type="submit">Delete</button></form>
</td>
</tr>
"#,
        cover,
        escape(&book.title),
        escape(&book.author),
        rating,
        date_read,
        escape(review),
        book.id,
        book.id
    )
}

/// Create form when `book` is `None`, pre-filled edit form otherwise.
pub fn book_form(book: Option<&Book>) -> String {
    let (heading, action) = match book {
        Some(book) => ("Edit book".to_string(), format!("/books/{}", book.id)),
        None => ("Add a book".to_string(), "/books".to_string()),
    };

    let title = book.map(|b| escape(&b.title)).unwrap_or_default();
    let author = book.map(|b| escape(&b.author)).unwrap_or_default();
    let review = book
        .and_then(|b| b.review.as_deref())
        .map(escape)
        .unwrap_or_default();
    let rating = book
        .and_then(|b| b.rating)
        .map(|r| r.to_string())
        .unwrap_or_default();
    let date_read = book
        .and_then(|b| b.date_read)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let isbn = book
        .and_then(|b| b.isbn.as_deref())
        .map(escape)
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{}</h1>
<form method="post" action="{}">
<label>Title <input name="title" value="{}" required></label>
<label>Author <input name="author" value="{}" required></label>
<label>Review <textarea name="review">{}</textarea></label>
<label>Rating <input name="rating" type="number" min="0" max="5" step="0.5" value="{}"></label>
<label>Date read <input name="date_read" type="date" value="{}"></label>
<label>ISBN <input name="isbn" value="{}"></label>
<button type="submit">Save</button>
<a href="/books">Cancel</a>
</form>"#,
        heading, action, title, author, review, rating, date_read, isbn
    );

    layout(&heading, &body)
}

pub fn not_found() -> &'static str {
    "Page not found"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            review: None,
            rating: Some(5.0),
            date_read: None,
            isbn: Some("9780441013593".to_string()),
            cover_url: Some(
                "https://covers.openlibrary.org/b/isbn/9780441013593-L.jpg".to_string(),
            ),
        }
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(
            escape(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_renders_rows_and_cover() {
        let html = book_list(&[book()], false);
        assert!(html.contains("Dune"));
        assert!(html.contains("Frank Herbert"));
        assert!(html.contains("https://covers.openlibrary.org/b/isbn/9780441013593-L.jpg"));
        assert!(html.contains("/books/7/edit"));
        assert!(html.contains("/books/7/delete"));
        assert!(!html.contains("Database unavailable"));
    }

    #[test]
    fn list_annotates_degraded_state() {
        let html = book_list(&[], true);
        assert!(html.contains("Database unavailable"));
    }

    #[test]
    fn form_targets_create_or_update() {
        let create = book_form(None);
        assert!(create.contains("action=\"/books\""));

        let edit = book_form(Some(&book()));
        assert!(edit.contains("action=\"/books/7\""));
        assert!(edit.contains("value=\"Dune\""));
    }
}
