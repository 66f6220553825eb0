//! HTML pages. Every interpolated value goes through `escape_html`.

use crate::auth::AuthenticatedUser;
use crate::helper::escape_html as e;
use crate::models::Book;

use super::{checkout_path, detail_path, LIST_URL, LOGIN_URL, LOGOUT_URL, SIGNUP_URL};

pub const BUY_NOW: &str = "Buy Now";
pub const OUT_OF_STOCK: &str = "Out of Stock !";

fn layout(title: &str, user: Option<&AuthenticatedUser>, content: &str) -> String {
    let account = match user {
        Some(user) => format!(
            r#"<span class="user">Logged in as {}</span> <a href="{}">Log out</a>"#,
            e(&user.username),
            LOGOUT_URL
        ),
        None => format!(
            r#"<a href="{}">Log in</a> <a href="{}">Sign up</a>"#,
            LOGIN_URL, SIGNUP_URL
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Bookshop</title>
</head>
<body>
<nav><a href="{home}">Bookshop</a> {account}</nav>
<main>
{content}
</main>
</body>
</html>
"#,
        title = e(title),
        home = LIST_URL,
        account = account,
        content = content,
    )
}

pub fn book_list(books: &[Book], user: Option<&AuthenticatedUser>) -> String {
    let content = if books.is_empty() {
        "<p>No books yet.</p>".to_string()
    } else {
        let items: String = books
            .iter()
            .map(|book| {
                format!(
                    r#"<li><a href="{}">{}</a> <span class="price">${}</span></li>"#,
                    detail_path(book.id),
                    e(&book.title),
                    e(&book.price)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul class=\"books\">\n{}\n</ul>", items)
    };

    layout("Books", user, &format!("<h1>Books</h1>\n{}", content))
}

pub fn book_detail(book: &Book, user: Option<&AuthenticatedUser>) -> String {
    let availability = if book.is_available() {
        format!(
            r#"<a class="buy" href="{}">{}</a>"#,
            checkout_path(book.id),
            BUY_NOW
        )
    } else {
        format!(r#"<span class="out-of-stock">{}</span>"#, OUT_OF_STOCK)
    };

    let content = format!(
        r#"<article class="book">
<img src="{image_url}" alt="{title}">
<h1>{title}</h1>
<p class="author">by {author} <a href="{follow_author}">Follow the author</a></p>
<p class="description">{description}</p>
<p class="price">${price}</p>
{availability}
</article>"#,
        image_url = e(&book.image_url),
        title = e(&book.title),
        author = e(&book.author),
        follow_author = e(&book.follow_author),
        description = e(&book.description),
        price = e(&book.price),
        availability = availability,
    );

    layout(&book.title, user, &content)
}

pub fn checkout(book: &Book, user: &AuthenticatedUser) -> String {
    let content = format!(
        r#"<h1>Checkout</h1>
<table class="order">
<tr><th>Book</th><td>{title}</td></tr>
<tr><th>Author</th><td>{author}</td></tr>
<tr><th>Total</th><td>${price}</td></tr>
</table>
<p>Ordering as {username}.</p>
<a href="{back}">Back to the book</a>"#,
        title = e(&book.title),
        author = e(&book.author),
        price = e(&book.price),
        username = e(&user.username),
        back = detail_path(book.id),
    );

    layout("Checkout", Some(user), &content)
}

pub fn login_form(next: &str, error: Option<&str>) -> String {
    let content = format!(
        r#"<h1>Log in</h1>
{error}<form method="post" action="{action}">
<input type="hidden" name="next" value="{next}">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="{signup}">Sign up</a></p>"#,
        error = error_block(error),
        action = LOGIN_URL,
        next = e(next),
        signup = SIGNUP_URL,
    );

    layout("Log in", None, &content)
}

pub fn signup_form(error: Option<&str>) -> String {
    let content = format!(
        r#"<h1>Sign up</h1>
{error}<form method="post" action="{action}">
<label>Username <input type="text" name="username" required></label>
<label>Email <input type="email" name="email"></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign up</button>
</form>"#,
        error = error_block(error),
        action = SIGNUP_URL,
    );

    layout("Sign up", None, &content)
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        None,
        &format!("<h1>{}</h1>\n<p>{}</p>", e(title), e(message)),
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!("<p class=\"error\">{}</p>\n", e(message)))
        .unwrap_or_default()
}
