/* src/server/core/rust/src/page.rs */

//! Root page shell: head metadata, header, content region, cart tray, footer,
//! and the loader data island.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::commerce::{ActiveOrder, Collection, format_price};
use crate::context::InteractionContext;
use crate::errors::StorefrontError;
use crate::escape::{escape_html, escape_json_for_script};
use crate::loader::PageLoadResult;

pub const APP_META_TITLE: &str = "Storefront";
pub const DEFAULT_DATA_ID: &str = "__data";
pub const LIVE_RELOAD_PATH: &str = "/_storefront/dev/ws";
pub const ACTIVE_ORDER_PATH: &str = "/api/active-order";
/// Query parameter that opens (`open`) or closes (`closed`) the cart tray on
/// a full page load. The toggle forms submit it when scripting is off.
pub const CART_QUERY_PARAM: &str = "cart";

const FONT_STYLESHEET: &str =
  "https://fonts.googleapis.com/css?family=Roboto:300,400,500,700&display=swap";
const APP_STYLESHEET: &str = "/styles/app.css";

const LIVE_RELOAD_SCRIPT: &str = concat!(
  r#"<script>(function(){var ws,t;function c(){"#,
  r#"ws=new WebSocket((location.protocol==="https:"?"wss:":"ws:")"#,
  r#"+"//"+location.host+"/_storefront/dev/ws");"#,
  r#"ws.onmessage=function(){location.reload()};"#,
  r#"ws.onclose=function(){t=setTimeout(c,1000)}}c()})()</script>"#
);

// Client-side cart toggle. Intercepts the toggle and close forms so the
// tray flips without a round trip; without scripting the forms submit
// `?cart=open|closed` and the server renders the new state.
const CART_TRAY_SCRIPT: &str = concat!(
  r#"<script>(function(){var t=document.querySelector(".cart-tray"),"#,
  r#"b=document.querySelector('[data-action="toggle-cart"]');if(!t||!b)return;"#,
  r#"function s(o){t.hidden=!o;t.setAttribute("data-state",o?"open":"closed");"#,
  r#"b.setAttribute("aria-expanded",String(o))}"#,
  r#"document.addEventListener("click",function(e){var a=e.target.closest("[data-action]");"#,
  r#"if(!a)return;var k=a.getAttribute("data-action");"#,
  r#"if(k==="toggle-cart"){e.preventDefault();s(t.hidden)}"#,
  r#"else if(k==="close-cart"){e.preventDefault();s(false)}})})()</script>"#
);

/// Development builds get the live-reload socket; production never does.
/// Resolved once at startup and carried in [`ShellConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  Development,
  Production,
}

impl Default for BuildMode {
  fn default() -> Self {
    if cfg!(debug_assertions) { Self::Development } else { Self::Production }
  }
}

impl BuildMode {
  pub fn is_development(self) -> bool {
    self == Self::Development
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Production => "production",
    }
  }
}

impl FromStr for BuildMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "development" | "dev" => Ok(Self::Development),
      "production" | "prod" => Ok(Self::Production),
      other => Err(format!("unknown build mode \"{other}\" (expected development or production)")),
    }
  }
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
  pub mode: BuildMode,
  pub title: String,
  pub stylesheets: Vec<String>,
  /// Script ID for the loader data island.
  pub data_id: String,
  pub lang: String,
}

impl Default for ShellConfig {
  fn default() -> Self {
    Self {
      mode: BuildMode::default(),
      title: APP_META_TITLE.to_string(),
      stylesheets: vec![FONT_STYLESHEET.to_string(), APP_STYLESHEET.to_string()],
      data_id: DEFAULT_DATA_ID.to_string(),
      lang: "en".to_string(),
    }
  }
}

/// Renders route content into the root page's `<main>` region.
///
/// Receives the interaction context by shared reference: order handles are
/// usable, the cart tray flag is read-only.
pub trait Outlet: Send + Sync {
  fn render(&self, path: &str, data: &PageLoadResult, ctx: &InteractionContext) -> String;
}

/// Outlet that leaves the content region empty.
pub struct EmptyOutlet;

impl Outlet for EmptyOutlet {
  fn render(&self, _path: &str, _data: &PageLoadResult, _ctx: &InteractionContext) -> String {
    String::new()
  }
}

pub fn cart_quantity(order: Option<&ActiveOrder>) -> u32 {
  order.map_or(0, |o| o.total_quantity)
}

fn render_head(shell: &ShellConfig) -> String {
  let mut head = String::from(concat!(
    r#"<head><meta charset="utf-8">"#,
    r#"<meta name="viewport" content="width=device-width,initial-scale=1">"#,
    r#"<link rel="icon" href="/favicon.ico" type="image/png">"#,
  ));
  let _ = write!(head, "<title>{}</title>", escape_html(&shell.title));
  for href in &shell.stylesheets {
    let _ = write!(head, r#"<link rel="stylesheet" href="{}">"#, escape_html(href));
  }
  head.push_str("</head>");
  head
}

fn render_header(data: &PageLoadResult, quantity: u32, tray_open: bool) -> String {
  let mut out = String::from(r#"<header class="site-header"><a href="/" class="logo">"#);
  out.push_str(&escape_html(&data.active_channel.code));
  out.push_str("</a><nav>");
  for c in &data.collections {
    let _ = write!(
      out,
      r#"<a href="/collections/{}">{}</a>"#,
      escape_html(&c.slug),
      escape_html(&c.name)
    );
  }
  out.push_str("</nav>");
  match data.active_customer.customer {
    Some(ref customer) => {
      let _ = write!(out, r#"<a href="/account">{}</a>"#, escape_html(&customer.first_name));
    }
    None => out.push_str(r#"<a href="/sign-in">Sign in</a>"#),
  }
  let next = if tray_open { "closed" } else { "open" };
  let _ = write!(
    out,
    concat!(
      r#"<form method="get" class="cart-toggle">"#,
      r#"<input type="hidden" name="{param}" value="{next}">"#,
      r#"<button type="submit" data-action="toggle-cart" aria-expanded="{open}">Cart"#
    ),
    param = CART_QUERY_PARAM,
    next = next,
    open = tray_open,
  );
  if quantity > 0 {
    let _ = write!(out, r#"<span class="cart-count">{quantity}</span>"#);
  }
  out.push_str("</button></form></header>");
  out
}

fn render_cart_tray(order: Option<&ActiveOrder>, open: bool, fetching: bool) -> String {
  let state = if open { "open" } else { "closed" };
  let mut out = format!(
    concat!(
      r#"<aside class="cart-tray" data-state="{state}" aria-busy="{fetching}"{hidden}>"#,
      r#"<form method="get"><input type="hidden" name="{param}" value="closed">"#,
      r#"<button type="submit" data-action="close-cart">Close</button></form>"#
    ),
    state = state,
    fetching = fetching,
    hidden = if open { "" } else { " hidden" },
    param = CART_QUERY_PARAM,
  );
  match order {
    Some(order) if !order.lines.is_empty() => {
      out.push_str("<ul>");
      for line in &order.lines {
        let id = escape_html(&line.id);
        let _ = write!(
          out,
          concat!(
            r#"<li data-line="{id}"><span>{name}</span>"#,
            r#"<form method="post" action="{action}"><input type="hidden" name="action" value="adjustItem">"#,
            r#"<input type="hidden" name="orderLineId" value="{id}">"#,
            r#"<input type="number" name="quantity" min="0" value="{qty}"></form>"#,
            r#"<form method="post" action="{action}"><input type="hidden" name="action" value="removeItem">"#,
            r#"<input type="hidden" name="orderLineId" value="{id}"><button>Remove</button></form>"#,
            r#"<span>{price}</span></li>"#
          ),
          id = id,
          name = escape_html(&line.product_variant.name),
          action = ACTIVE_ORDER_PATH,
          qty = line.quantity,
          price = escape_html(&format_price(line.line_price_with_tax, &order.currency_code)),
        );
      }
      let _ = write!(
        out,
        r#"</ul><p class="subtotal">{}</p>"#,
        escape_html(&format_price(order.sub_total_with_tax, &order.currency_code))
      );
    }
    _ => out.push_str(r#"<p class="empty">Your cart is empty</p>"#),
  }
  out.push_str("</aside>");
  out
}

fn render_footer(collections: &[Collection]) -> String {
  let mut out = String::from(r#"<footer><ul class="collections">"#);
  for c in collections {
    let _ = write!(
      out,
      r#"<li><a href="/collections/{}">{}</a></li>"#,
      escape_html(&c.slug),
      escape_html(&c.name)
    );
  }
  out.push_str("</ul></footer>");
  out
}

fn render_data_script(data_id: &str, data: &impl Serialize) -> Result<String, StorefrontError> {
  let json = serde_json::to_string(data)
    .map_err(|e| StorefrontError::internal(format!("failed to serialize loader data: {e}")))?;
  Ok(format!(
    r#"<script id="{}" type="application/json">{}</script>"#,
    escape_html(data_id),
    escape_json_for_script(&json)
  ))
}

/// Assemble the full document. `content` is the outlet's output, inserted
/// as-is into `<main>`.
pub fn render_root_page(
  shell: &ShellConfig,
  data: &PageLoadResult,
  ctx: &InteractionContext,
  content: &str,
) -> Result<String, StorefrontError> {
  let order = ctx.order().active_order();
  let quantity = cart_quantity(order.as_ref());
  let tray_open = ctx.is_tray_open();

  let mut html = format!(r#"<!DOCTYPE html><html lang="{}" id="app">"#, escape_html(&shell.lang));
  html.push_str(&render_head(shell));
  html.push_str("<body>");
  html.push_str(&render_header(data, quantity, tray_open));
  html.push_str("<main>");
  html.push_str(content);
  html.push_str("</main>");
  html.push_str(&render_cart_tray(order.as_ref(), tray_open, ctx.order().is_fetching()));
  html.push_str(CART_TRAY_SCRIPT);
  html.push_str(&render_data_script(&shell.data_id, data)?);
  if shell.mode.is_development() {
    html.push_str(LIVE_RELOAD_SCRIPT);
  }
  html.push_str(&render_footer(&data.collections));
  html.push_str("</body></html>");
  Ok(html)
}
