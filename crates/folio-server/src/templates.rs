//! Server-rendered HTML pages.
//!
//! Every dynamic string passes through [`escape_html`] before it reaches the
//! output. Rendered page content is the one exception: it comes from
//! `folio-renderer`, which escapes as it renders.

use std::fmt::Write;

use folio_renderer::escape_html as escape;
use folio_site::{ChatMessage, Role, SearchHit, TreeNode};
use folio_storage::{DatabaseRow, PageId, Theme};

use crate::session::Identity;
use crate::urls::{page_action_url, page_url};

/// Inline stylesheet shared by all pages.
const BASE_CSS: &str = "\
body { margin: 0; font-family: system-ui, sans-serif; }
.theme-light { background: #fff; color: #1f2328; }
.theme-dark { background: #1e1f22; color: #e6e6e6; }
.theme-dark a { color: #8ab4f8; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 260px; flex-shrink: 0; padding: 1rem; border-right: 1px solid #8884; }
.sidebar ul { list-style: none; padding-left: 1rem; margin: 0; }
.sidebar nav > ul { padding-left: 0; }
.sidebar a.active { font-weight: 600; }
.brand { display: block; font-size: 1.25rem; font-weight: 700; margin-bottom: 1rem; }
.main { flex: 1; min-width: 0; }
.topbar { display: flex; gap: 1rem; align-items: center; justify-content: flex-end; \
padding: 0.5rem 1rem; border-bottom: 1px solid #8884; }
.topbar form { margin: 0; }
main { padding: 1rem 2rem; max-width: 60rem; }
.actions { display: flex; gap: 1rem; margin-bottom: 1rem; }
.error { color: #d1242f; }
.notice { color: #1a7f37; }
table { border-collapse: collapse; }
th, td { border: 1px solid #8886; padding: 0.25rem 0.5rem; }
textarea { width: 100%; min-height: 20rem; font-family: monospace; }
.chat .user { font-weight: 600; }
";

/// Shared frame around every page body.
pub(crate) struct Layout<'a> {
    /// Document title.
    pub(crate) title: &'a str,
    /// Color theme.
    pub(crate) theme: Theme,
    /// Logged-in user, if any.
    pub(crate) user: Option<&'a Identity>,
    /// Sidebar page tree.
    pub(crate) forest: &'a [TreeNode],
    /// Page to highlight in the sidebar.
    pub(crate) active: Option<&'a str>,
}

/// Render a complete HTML document around `body`.
pub(crate) fn render_layout(layout: &Layout<'_>, body: &str) -> String {
    let mut html = String::with_capacity(4096 + body.len());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    let _ = writeln!(html, "<title>{} · Folio</title>", escape(layout.title));
    html.push_str("<link rel=\"stylesheet\" href=\"/static/style.css\">\n");
    let _ = writeln!(html, "<style>\n{BASE_CSS}</style>");
    html.push_str("</head>\n");
    let _ = writeln!(html, "<body class=\"theme-{}\">", layout.theme.as_str());
    html.push_str("<div class=\"layout\">\n");

    render_sidebar(&mut html, layout.forest, layout.active);

    html.push_str("<div class=\"main\">\n");
    render_topbar(&mut html, layout.user, layout.theme);
    html.push_str("<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n</div>\n</div>\n</body>\n</html>");
    html
}

fn render_sidebar(html: &mut String, forest: &[TreeNode], active: Option<&str>) {
    html.push_str("<aside class=\"sidebar\">\n");
    html.push_str("<a href=\"/\" class=\"brand\">Folio</a>\n");
    html.push_str(
        "<form action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search pages\"></form>\n",
    );
    html.push_str("<nav>\n<ul>\n");
    render_tree(html, forest, active);
    html.push_str("</ul>\n</nav>\n");
    html.push_str("<p><a href=\"/page/new\">+ New page</a></p>\n");
    html.push_str("</aside>\n");
}

fn render_tree(html: &mut String, nodes: &[TreeNode], active: Option<&str>) {
    for node in nodes {
        let class = if active == Some(node.id.as_str()) {
            " class=\"active\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<li><a href=\"{}\"{class}>{}</a>",
            escape(&page_url(node.id.as_str())),
            escape(&node.title)
        );
        if !node.children.is_empty() {
            html.push_str("\n<ul>\n");
            render_tree(html, &node.children, active);
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
}

fn render_topbar(html: &mut String, user: Option<&Identity>, theme: Theme) {
    html.push_str("<header class=\"topbar\">\n");
    match user {
        Some(user) => {
            let _ = writeln!(html, "<span>{}</span>", escape(user.email()));
            html.push_str("<a href=\"/ai\">Assistant</a>\n");
            html.push_str("<a href=\"/settings\">Settings</a>\n");
            html.push_str("<a href=\"/logout\">Log out</a>\n");
        }
        None => {
            html.push_str("<a href=\"/login\">Log in</a>\n");
            html.push_str("<a href=\"/signup\">Sign up</a>\n");
        }
    }
    let label = match theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    let _ = writeln!(
        html,
        "<form action=\"/toggle_theme\" method=\"post\">\
         <button type=\"submit\">{label}</button></form>"
    );
    html.push_str("</header>\n");
}

/// Home page body.
pub(crate) fn home_body() -> String {
    "<h1>Welcome to Folio</h1>\n\
     <p>Pick a page from the sidebar, or <a href=\"/page/new\">create a new one</a>.</p>"
        .to_owned()
}

/// Search page body.
pub(crate) fn search_body(query: &str, hits: &[SearchHit]) -> String {
    let mut html = String::new();
    html.push_str("<h1>Search</h1>\n");
    let _ = writeln!(
        html,
        "<form action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"q\" value=\"{}\"> \
         <button type=\"submit\">Search</button></form>",
        escape(query)
    );

    if query.is_empty() {
        return html;
    }
    if hits.is_empty() {
        let _ = write!(html, "<p>No pages match &quot;{}&quot;.</p>", escape(query));
        return html;
    }

    html.push_str("<ul>\n");
    for hit in hits {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&page_url(hit.id.as_str())),
            escape(&hit.title)
        );
    }
    html.push_str("</ul>");
    html
}

/// Page view body.
///
/// `content_html` is the already rendered page content; `subpages` lists the
/// existing children as `(id, title)`.
pub(crate) fn page_body(
    id: &str,
    title: &str,
    content_html: &str,
    subpages: &[(PageId, String)],
) -> String {
    let mut html = String::with_capacity(content_html.len() + 1024);
    let _ = writeln!(html, "<article>\n<h1>{}</h1>", escape(title));

    html.push_str("<div class=\"actions\">\n");
    let _ = writeln!(
        html,
        "<a href=\"{}\">Edit</a>",
        escape(&page_action_url(id, "edit"))
    );
    let _ = writeln!(
        html,
        "<a href=\"/page/new?parent={}\">Add subpage</a>",
        escape(&crate::urls::encode(id))
    );
    let _ = writeln!(
        html,
        "<a href=\"{}\">Database</a>",
        escape(&page_action_url(id, "database"))
    );
    let _ = writeln!(
        html,
        "<a href=\"{}\">Delete</a>",
        escape(&page_action_url(id, "delete"))
    );
    html.push_str("</div>\n");

    html.push_str("<div class=\"content\">\n");
    html.push_str(content_html);
    html.push_str("\n</div>\n");

    if !subpages.is_empty() {
        html.push_str("<h2>Subpages</h2>\n<ul>\n");
        for (child_id, child_title) in subpages {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&page_url(child_id.as_str())),
                escape(child_title)
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</article>");
    html
}

/// New page form body. `parent` is the `(id, title)` of the parent page.
pub(crate) fn new_page_body(parent: Option<(&str, &str)>) -> String {
    let mut html = String::new();
    html.push_str("<h1>New page</h1>\n");
    if let Some((_, parent_title)) = parent {
        let _ = writeln!(html, "<p>Inside <strong>{}</strong></p>", escape(parent_title));
    }
    html.push_str("<form action=\"/page/new\" method=\"post\">\n");
    html.push_str(
        "<p><label>Title <input type=\"text\" name=\"title\" autofocus></label></p>\n",
    );
    if let Some((parent_id, _)) = parent {
        let _ = writeln!(
            html,
            "<input type=\"hidden\" name=\"parent\" value=\"{}\">",
            escape(parent_id)
        );
    }
    html.push_str("<button type=\"submit\">Create</button>\n</form>");
    html
}

/// Edit form body.
pub(crate) fn edit_page_body(id: &str, title: &str, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 1024);
    let _ = writeln!(html, "<h1>Edit {}</h1>", escape(title));
    let _ = writeln!(
        html,
        "<form action=\"{}\" method=\"post\">",
        escape(&page_action_url(id, "edit"))
    );
    let _ = writeln!(
        html,
        "<p><label>Title <input type=\"text\" name=\"title\" value=\"{}\"></label></p>",
        escape(title)
    );
    let _ = writeln!(
        html,
        "<p><textarea name=\"content\">\n{}</textarea></p>",
        escape(content)
    );
    html.push_str(
        "<p>Lines starting with <code>- [ ]</code> or <code>- [x]</code> become checklist \
         items; <code>```</code> lines open and close code blocks.</p>\n",
    );
    let _ = write!(
        html,
        "<button type=\"submit\">Save</button> <a href=\"{}\">Cancel</a>\n</form>",
        escape(&page_url(id))
    );
    html
}

/// Delete confirmation body.
pub(crate) fn delete_page_body(id: &str, title: &str, subpages: usize) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h1>Delete {}?</h1>", escape(title));
    if subpages > 0 {
        let _ = writeln!(
            html,
            "<p class=\"error\">Its {subpages} subpage(s) will be deleted too.</p>"
        );
    }
    let _ = write!(
        html,
        "<form action=\"{}\" method=\"post\">\
         <button type=\"submit\">Delete</button> <a href=\"{}\">Cancel</a></form>",
        escape(&page_action_url(id, "delete")),
        escape(&page_url(id))
    );
    html
}

/// Page database body.
pub(crate) fn database_body(
    id: &str,
    title: &str,
    columns: &[&str],
    rows: &[DatabaseRow],
) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<h1><a href=\"{}\">{}</a> · Database</h1>",
        escape(&page_url(id)),
        escape(title)
    );

    if rows.is_empty() {
        html.push_str("<p>No rows yet.</p>\n");
    } else {
        html.push_str("<table>\n<thead><tr>");
        for column in columns {
            let _ = write!(html, "<th>{}</th>", escape(column));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in rows {
            html.push_str("<tr>");
            for column in columns {
                let cell = row.get(*column).map_or("", String::as_str);
                let _ = write!(html, "<td>{}</td>", escape(cell));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<h2>Add row</h2>\n");
    let _ = writeln!(
        html,
        "<form action=\"{}\" method=\"post\">",
        escape(&page_action_url(id, "database/add"))
    );
    for column in columns {
        let _ = writeln!(
            html,
            "<p><label>{0} <input type=\"text\" name=\"{0}\"></label></p>",
            escape(column)
        );
    }
    html.push_str(
        "<p><label>New column <input type=\"text\" name=\"new_col\"></label> \
         <label>Value <input type=\"text\" name=\"new_val\"></label></p>\n",
    );
    html.push_str("<button type=\"submit\">Add row</button>\n</form>");
    html
}

/// Settings page body.
pub(crate) fn settings_body(models: &[String], selected: &str) -> String {
    let mut html = String::new();
    html.push_str("<h1>Settings</h1>\n");
    html.push_str("<form action=\"/settings\" method=\"post\">\n");
    html.push_str("<p><label>Default assistant model <select name=\"model\">\n");
    render_model_options(&mut html, models, selected);
    html.push_str("</select></label></p>\n");
    html.push_str("<button type=\"submit\">Save</button>\n</form>");
    html
}

fn render_model_options(html: &mut String, models: &[String], selected: &str) {
    for model in models {
        let attr = if model == selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{attr}>{0}</option>",
            escape(model)
        );
    }
}

/// Signup page body.
pub(crate) fn signup_body(error: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<h1>Sign up</h1>\n");
    render_message(&mut html, "error", error);
    html.push_str("<form action=\"/signup\" method=\"post\">\n");
    html.push_str("<p><label>Email <input type=\"email\" name=\"email\"></label></p>\n");
    html.push_str(
        "<p><label>Password <input type=\"password\" name=\"password\"></label></p>\n",
    );
    html.push_str(
        "<p><label>Confirm password <input type=\"password\" name=\"confirm\"></label></p>\n",
    );
    html.push_str("<button type=\"submit\">Create account</button>\n</form>\n");
    html.push_str("<p>Already registered? <a href=\"/login\">Log in</a></p>");
    html
}

/// Login page body.
pub(crate) fn login_body(next: &str, notice: Option<&str>, error: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<h1>Log in</h1>\n");
    render_message(&mut html, "notice", notice);
    render_message(&mut html, "error", error);
    html.push_str("<form action=\"/login\" method=\"post\">\n");
    html.push_str("<p><label>Email <input type=\"email\" name=\"email\"></label></p>\n");
    html.push_str(
        "<p><label>Password <input type=\"password\" name=\"password\"></label></p>\n",
    );
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"next\" value=\"{}\">",
        escape(next)
    );
    html.push_str("<button type=\"submit\">Log in</button>\n</form>\n");
    html.push_str("<p>No account? <a href=\"/signup\">Sign up</a></p>");
    html
}

fn render_message(html: &mut String, class: &str, message: Option<&str>) {
    if let Some(message) = message {
        let _ = writeln!(html, "<p class=\"{class}\">{}</p>", escape(message));
    }
}

/// Assistant chat body.
pub(crate) fn assistant_body(
    models: &[String],
    selected: &str,
    messages: &[ChatMessage],
) -> String {
    let mut html = String::new();
    html.push_str("<h1>Assistant</h1>\n");

    html.push_str("<div class=\"chat\">\n");
    for message in messages {
        let (class, who) = match message.role {
            Role::User => ("user", "You"),
            Role::Assistant => ("assistant", "Assistant"),
        };
        let _ = writeln!(
            html,
            "<p class=\"{class}\">{who}: {}</p>",
            escape(&message.text)
        );
    }
    html.push_str("</div>\n");

    html.push_str("<form action=\"/ai\" method=\"post\">\n");
    html.push_str("<p><label>Model <select name=\"model\">\n");
    render_model_options(&mut html, models, selected);
    html.push_str("</select></label></p>\n");
    html.push_str("<p><textarea name=\"message\" rows=\"4\"></textarea></p>\n");
    html.push_str("<button type=\"submit\">Send</button>\n</form>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, title: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            id: PageId::from(id),
            title: title.to_owned(),
            children,
        }
    }

    fn layout_with<'a>(forest: &'a [TreeNode], user: Option<&'a Identity>) -> Layout<'a> {
        Layout {
            title: "Home",
            theme: Theme::Dark,
            user,
            forest,
            active: Some("b"),
        }
    }

    #[test]
    fn test_layout_renders_nested_tree() {
        let forest = vec![node("a", "Alpha", vec![node("b", "Beta", Vec::new())])];

        let html = render_layout(&layout_with(&forest, None), "<p>body</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body class=\"theme-dark\">"));
        assert!(html.contains("<li><a href=\"/page/a\">Alpha</a>\n<ul>\n"));
        assert!(html.contains("<a href=\"/page/b\" class=\"active\">Beta</a>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("Light mode"));
    }

    #[test]
    fn test_layout_escapes_titles() {
        let forest = vec![node("x", "<script>alert(1)</script>", Vec::new())];

        let html = render_layout(&layout_with(&forest, None), "");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_layout_anonymous_links() {
        let html = render_layout(&layout_with(&[], None), "");

        assert!(html.contains("href=\"/login\""));
        assert!(!html.contains("href=\"/logout\""));
    }

    #[test]
    fn test_search_body_without_query() {
        let html = search_body("", &[]);

        assert!(!html.contains("No pages match"));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_search_body_no_hits() {
        let html = search_body("<x>", &[]);

        assert!(html.contains("No pages match &quot;&lt;x&gt;&quot;."));
    }

    #[test]
    fn test_search_body_lists_hits() {
        let hits = vec![SearchHit {
            id: PageId::from("p1"),
            title: "Plans & ideas".to_owned(),
        }];

        let html = search_body("plans", &hits);

        assert!(html.contains("<li><a href=\"/page/p1\">Plans &amp; ideas</a></li>"));
    }

    #[test]
    fn test_page_body_keeps_rendered_content() {
        let html = page_body("p1", "T", "<p>rendered</p>", &[]);

        assert!(html.contains("<p>rendered</p>"));
        assert!(html.contains("href=\"/page/p1/edit\""));
        assert!(html.contains("href=\"/page/new?parent=p1\""));
        assert!(!html.contains("Subpages"));
    }

    #[test]
    fn test_page_body_lists_subpages() {
        let html = page_body("p1", "T", "", &[(PageId::from("c1"), "Child".to_owned())]);

        assert!(html.contains("<li><a href=\"/page/c1\">Child</a></li>"));
    }

    #[test]
    fn test_edit_body_escapes_content() {
        let html = edit_page_body("p1", "Title \"quoted\"", "</textarea><b>");

        assert!(html.contains("value=\"Title &quot;quoted&quot;\""));
        assert!(
            html.contains("<textarea name=\"content\">\n&lt;/textarea&gt;&lt;b&gt;</textarea>")
        );
    }

    #[test]
    fn test_edit_body_keeps_leading_newline() {
        let html = edit_page_body("p1", "T", "\nsecond line");

        assert!(html.contains("<textarea name=\"content\">\n\nsecond line</textarea>"));
    }

    #[test]
    fn test_delete_body_posts_to_delete() {
        let html = delete_page_body("p1", "Old <notes>", 2);

        assert!(html.contains("<h1>Delete Old &lt;notes&gt;?</h1>"));
        assert!(html.contains("<form action=\"/page/p1/delete\" method=\"post\">"));
        assert!(html.contains("2 subpage(s)"));
    }

    #[test]
    fn test_new_page_body_with_parent() {
        let html = new_page_body(Some(("p1", "Parent")));

        assert!(html.contains("name=\"parent\" value=\"p1\""));
        assert!(html.contains("<strong>Parent</strong>"));
    }

    #[test]
    fn test_database_body_fills_missing_cells() {
        let mut first = DatabaseRow::new();
        first.insert("Name".to_owned(), "Ada".to_owned());
        let mut second = DatabaseRow::new();
        second.insert("Year".to_owned(), "1843".to_owned());

        let html = database_body("p1", "People", &["Name", "Year"], &[first, second]);

        assert!(html.contains("<th>Name</th><th>Year</th>"));
        assert!(html.contains("<tr><td>Ada</td><td></td></tr>"));
        assert!(html.contains("<tr><td></td><td>1843</td></tr>"));
        assert!(html.contains("action=\"/page/p1/database/add\""));
    }

    #[test]
    fn test_settings_body_marks_selected_model() {
        let models = vec!["Gemini".to_owned(), "Claude".to_owned()];

        let html = settings_body(&models, "Claude");

        assert!(html.contains("<option value=\"Claude\" selected>Claude</option>"));
        assert!(html.contains("<option value=\"Gemini\">Gemini</option>"));
    }

    #[test]
    fn test_login_body_keeps_next() {
        let html = login_body("/page/1", Some("Account created"), None);

        assert!(html.contains("name=\"next\" value=\"/page/1\""));
        assert!(html.contains("<p class=\"notice\">Account created</p>"));
    }

    #[test]
    fn test_assistant_body_escapes_messages() {
        let messages = vec![ChatMessage {
            role: Role::User,
            text: "<b>hi</b>".to_owned(),
        }];

        let html = assistant_body(&["Gemini".to_owned()], "Gemini", &messages);

        assert!(html.contains("You: &lt;b&gt;hi&lt;/b&gt;"));
    }
}
