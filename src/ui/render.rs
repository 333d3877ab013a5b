//! HTML for the product listing page and its modal form.

use super::form::ProductForm;
use super::gateway::ProductRow;

pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

/// Client-held pagination state, carried in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub per_page: u32,
}

impl Pager {
    pub fn query(&self) -> String {
        format!("page={}&per_page={}", self.page, self.per_page)
    }

    /// Listing URL for this page, optionally carrying a notification.
    pub fn listing_url(&self, notice: Option<&Notice>) -> String {
        match notice {
            Some(Notice::Success(msg)) => format!("/?{}&notice={}", self.query(), urlencoding::encode(msg)),
            Some(Notice::Error(msg)) => format!("/?{}&error={}", self.query(), urlencoding::encode(msg)),
            None => format!("/?{}", self.query()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub values: ProductForm,
}

/// Everything the page shows: the current rows, plus the open form if any.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub pager: Pager,
    pub rows: Vec<ProductRow>,
    pub form: Option<FormState>,
    pub notice: Option<Notice>,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn render_listing(view: &ListingView) -> String {
    let mut body = String::new();
    body.push_str("<h1>Products</h1>\n");

    if let Some(notice) = &view.notice {
        body.push_str(&render_notice(notice));
    }

    body.push_str(&format!(
        "<p><a class=\"button\" href=\"/products/new?{}\">Add Product</a></p>\n",
        view.pager.query()
    ));
    body.push_str(&render_table(view));
    body.push_str(&render_pagination(view));

    if let Some(form) = &view.form {
        body.push_str(&render_form(form, view.pager));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Inventory</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        STYLE, body
    )
}

fn render_notice(notice: &Notice) -> String {
    let (class, msg) = match notice {
        Notice::Success(msg) => ("notice success", msg),
        Notice::Error(msg) => ("notice error", msg),
    };
    format!("<div class=\"{}\" role=\"status\">{}</div>\n", class, escape_html(msg))
}

fn render_table(view: &ListingView) -> String {
    let query = view.pager.query();
    let mut html = String::from(
        "<table>\n<thead><tr><th>Name</th><th>Price</th><th>Stock</th><th></th></tr></thead>\n<tbody>\n",
    );

    if view.rows.is_empty() {
        html.push_str("<tr><td colspan=\"4\" class=\"empty\">No products</td></tr>\n");
    }

    for row in &view.rows {
        let id = urlencoding::encode(&row.id);
        html.push_str(&format!(
            "<tr><td>{name}</td><td>{price}</td><td>{stock}</td><td>\
             <a href=\"/products/{id}/edit?{query}\">Edit</a> \
             <form method=\"post\" action=\"/products/{id}/delete?{query}\" class=\"inline\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            name = escape_html(&row.name),
            price = row.price,
            stock = row.stock,
            id = id,
            query = query,
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_pagination(view: &ListingView) -> String {
    let pager = view.pager;
    let mut html = String::from("<nav class=\"pagination\">\n");

    if pager.page > 1 {
        let prev = Pager { page: pager.page - 1, ..pager };
        html.push_str(&format!("<a href=\"{}\">Previous</a>\n", prev.listing_url(None)));
    }
    html.push_str(&format!("<span>Page {}</span>\n", pager.page));
    // A full page means there may be more; the API reports no total.
    if pager.per_page > 0 && view.rows.len() == pager.per_page as usize {
        let next = Pager { page: pager.page.saturating_add(1), ..pager };
        html.push_str(&format!("<a href=\"{}\">Next</a>\n", next.listing_url(None)));
    }

    html.push_str("<form method=\"get\" action=\"/\" class=\"inline\">\n");
    html.push_str(&format!("<input type=\"hidden\" name=\"page\" value=\"{}\">\n", pager.page));
    html.push_str("<label>Per page <select name=\"per_page\">");
    for size in PAGE_SIZES {
        let selected = if size == pager.per_page { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", size, selected));
    }
    html.push_str("</select></label> <button type=\"submit\">Apply</button>\n</form>\n</nav>\n");
    html
}

fn render_form(form: &FormState, pager: Pager) -> String {
    let (title, action, submit) = match &form.mode {
        FormMode::Create => ("Add Product".to_string(), format!("/products?{}", pager.query()), "Create"),
        FormMode::Edit { id } => (
            "Edit Product".to_string(),
            format!("/products/{}?{}", urlencoding::encode(id), pager.query()),
            "Save",
        ),
    };

    format!(
        "<dialog open>\n<h2>{title}</h2>\n<form method=\"post\" action=\"{action}\">\n\
         <label>Name <input name=\"name\" value=\"{name}\" required></label>\n\
         <label>Price <input name=\"price\" value=\"{price}\" inputmode=\"decimal\" required></label>\n\
         <label>Stock <input name=\"stock\" value=\"{stock}\" inputmode=\"numeric\" required></label>\n\
         <button type=\"submit\">{submit}</button> <a href=\"{cancel}\">Cancel</a>\n\
         </form>\n</dialog>\n",
        title = title,
        action = action,
        name = escape_html(&form.values.name),
        price = escape_html(&form.values.price),
        stock = escape_html(&form.values.stock),
        submit = submit,
        cancel = pager.listing_url(None),
    )
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;min-width:32rem}\
th,td{border-bottom:1px solid #ddd;padding:.4rem .8rem;text-align:left}\
.empty{color:#888}\
.inline{display:inline}\
.notice{padding:.6rem 1rem;margin-bottom:1rem;border-radius:4px}\
.success{background:#e6f4ea}.error{background:#fce8e6}\
.pagination{margin-top:1rem;display:flex;gap:1rem;align-items:center}\
dialog label{display:block;margin:.5rem 0}";

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rows: Vec<ProductRow>, pager: Pager) -> ListingView {
        ListingView { pager, rows, form: None, notice: None }
    }

    fn row(id: &str, name: &str) -> ProductRow {
        ProductRow { id: id.into(), name: name.into(), price: 9.99, stock: 5 }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_listing_url_encodes_notice() {
        let pager = Pager { page: 2, per_page: 5 };
        assert_eq!(pager.listing_url(None), "/?page=2&per_page=5");
        assert_eq!(
            pager.listing_url(Some(&Notice::Error("not found & gone".into()))),
            "/?page=2&per_page=5&error=not%20found%20%26%20gone"
        );
    }

    #[test]
    fn test_rows_are_escaped_and_priced() {
        let html = render_listing(&view(vec![row("1", "<script>")], Pager { page: 1, per_page: 10 }));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<td><script>"));
        assert!(html.contains("<td>9.99</td>"));
        assert!(html.contains("/products/1/edit?page=1&per_page=10"));
    }

    #[test]
    fn test_price_is_shown_as_stored() {
        let mut precise = row("1", "Widget");
        precise.price = 9.999;
        let html = render_listing(&view(vec![precise], Pager { page: 1, per_page: 10 }));
        assert!(html.contains("<td>Widget</td><td>9.999</td>"));
    }

    #[test]
    fn test_pagination_links() {
        let first = render_listing(&view(vec![row("1", "a")], Pager { page: 1, per_page: 1 }));
        assert!(!first.contains("Previous"));
        assert!(first.contains("Next"));

        let last = render_listing(&view(Vec::new(), Pager { page: 3, per_page: 1 }));
        assert!(last.contains("Previous"));
        assert!(!last.contains("Next"));
        assert!(last.contains("No products"));
    }

    #[test]
    fn test_edit_form_targets_record() {
        let mut v = view(Vec::new(), Pager { page: 1, per_page: 10 });
        v.form = Some(FormState {
            mode: FormMode::Edit { id: "4".into() },
            values: ProductForm { name: "Bolt".into(), price: "1.5".into(), stock: "2".into() },
        });
        let html = render_listing(&v);
        assert!(html.contains("<dialog open>"));
        assert!(html.contains("action=\"/products/4?page=1&per_page=10\""));
        assert!(html.contains("value=\"Bolt\""));
    }
}
