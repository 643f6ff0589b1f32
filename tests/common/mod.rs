#![allow(dead_code)]

use trucking_company_scraper::GridLayout;

pub const LISTING_PATH: &str = "/trucking/companies";

pub fn company(page: usize, row: usize, col: usize) -> String {
    format!("Carrier {} {}-{}", page, row, col)
}

/// Listing markup shaped like the live site, optionally with one heading removed.
pub fn listing_page(page: usize, layout: &GridLayout, missing: Option<(usize, usize)>) -> String {
    let mut rows = String::from("<div class=\"filters\">Filter by state</div>");
    for (row, col_count) in (layout.first_row..).zip(layout.row_widths.iter().copied()) {
        rows.push_str("<div class=\"row\">");
        for col in 1..=col_count {
            let heading = if missing == Some((row, col)) {
                String::new()
            } else {
                format!("<h2>{}</h2>", company(page, row, col))
            };
            rows.push_str(&format!(
                "<div><a href=\"/c/{page}-{row}-{col}\"><div><div>\
                 <div><img src=\"logo.png\"></div>\
                 <div>{heading}<p>Dry van, reefer</p></div>\
                 </div></div></a></div>"
            ));
        }
        rows.push_str("</div>");
    }

    format!(
        "<!DOCTYPE html><html><head><title>Companies</title></head><body>\
         <div id=\"sapper\"><nav>menu</nav><main><div>\
         <div><h1>Trucking Companies</h1></div>\
         <div>{rows}</div>\
         </div></main></div></body></html>"
    )
}
