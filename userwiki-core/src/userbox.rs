//! Built-in userbox special form.
//!
//! `{{userbox|left=..|middle=..|right=..}}` normally resolves like any other
//! template, but when no page named `userbox` exists the resolver falls back
//! to this generator, which produces a small fixed-layout badge. The markup
//! is a stable contract with the front end and must not change shape.

use indexmap::IndexMap;

const DEFAULT_BG: &str = "#f0f0f0";
const DEFAULT_FG: &str = "#000000";

// Section classes referenced by the generated container. Emitted after the
// markup so each userbox is self-contained in the rendered page.
const USERBOX_STYLE: &str = r#"
<style>
.userbox-left {
  width: 45px;
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 2px;
  box-sizing: border-box;
  text-align: center;
}

.userbox-middle {
  flex: 1;
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 2px;
  box-sizing: border-box;
  text-align: center;
}

.userbox-right {
  width: 45px;
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 2px;
  box-sizing: border-box;
  text-align: center;
}
</style>"#;

/// Generate userbox HTML from template parameters.
///
/// Three content parameters (`left`, `middle`, `right`) and a bg/fg color
/// pair per section (`left-bg`, `left-fg`, ...). The container is a fixed
/// 185x45 box; side sections are emitted only when their content parameter
/// is non-empty, the middle section always. Pure string assembly, no
/// escaping and no page lookups here.
pub fn generate_userbox_html(params: &IndexMap<String, String>) -> String {
    let get = |key: &str, default: &str| -> String {
        params
            .get(key)
            .map(String::as_str)
            .unwrap_or(default)
            .to_string()
    };

    let left = get("left", "");
    let middle = get("middle", "");
    let right = get("right", "");

    let left_bg = get("left-bg", DEFAULT_BG);
    let left_fg = get("left-fg", DEFAULT_FG);
    let middle_bg = get("middle-bg", DEFAULT_BG);
    let middle_fg = get("middle-fg", DEFAULT_FG);
    let right_bg = get("right-bg", DEFAULT_BG);
    let right_fg = get("right-fg", DEFAULT_FG);

    let mut html = Vec::new();

    html.push(
        r#"<div class="userbox-container" style="display: inline-block; width: 185px; height: 45px; overflow: hidden; font-size: 12px; line-height: 1.2; border: 1px solid #aaa; border-radius: 2px;">"#
            .to_string(),
    );
    html.push(r#"  <div style="display: flex; height: 100%;">"#.to_string());

    if !left.is_empty() {
        html.push(format!(
            r#"    <div class="userbox-left" style="background-color: {left_bg}; color: {left_fg};">{left}</div>"#
        ));
    }

    // Middle flexes to fill whatever the side sections leave over
    html.push(format!(
        r#"    <div class="userbox-middle" style="background-color: {middle_bg}; color: {middle_fg};">{middle}</div>"#
    ));

    if !right.is_empty() {
        html.push(format!(
            r#"    <div class="userbox-right" style="background-color: {right_bg}; color: {right_fg};">{right}</div>"#
        ));
    }

    html.push("  </div>".to_string());
    html.push("</div>".to_string());
    html.push(USERBOX_STYLE.to_string());

    html.join("\n")
}
