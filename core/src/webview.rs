//! Scripts injected into the AI chat page.

use crate::service::{AiService, GENERIC_INPUT_SELECTORS};

/// Keeps the default arrow cursor over the hosted page.
const CURSOR_CSS: &str = "* { cursor: default !important; } \
a, button, input[type=\"submit\"], [role=\"button\"] { cursor: default !important; }";

const SEND_BUTTON_SELECTORS: &[&str] = &[
    "button[aria-label*=\"Send\"]",
    "button[data-testid*=\"send\"]",
    "#prompt-textarea + button",
    "button:has(svg)",
    "[role=\"button\"]:has(svg)",
];

fn json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    // Strings and string slices always serialize.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

pub fn inject_cursor_css_script() -> String {
    format!(
        "(function() {{ const style = document.createElement('style'); style.textContent = {}; document.head.appendChild(style); }})();",
        json(CURSOR_CSS)
    )
}

fn input_selectors(service: AiService) -> &'static [&'static str] {
    match service.input_selectors() {
        [] => GENERIC_INPUT_SELECTORS,
        selectors => selectors,
    }
}

/// Focus the service's first matching input and paste the clipboard into it.
pub fn paste_script(service: AiService) -> String {
    format!(
        r#"(function() {{
  const selectors = {selectors};
  let input = null;
  for (const sel of selectors) {{
    input = document.querySelector(sel);
    if (input) break;
  }}
  if (input) {{
    input.focus();
    document.execCommand('paste');
    return true;
  }}
  return false;
}})();"#,
        selectors = json(input_selectors(service))
    )
}

/// Type `message` into the service's input and submit it.
pub fn send_message_script(service: AiService, message: &str) -> String {
    format!(
        r#"(function() {{
  const selectors = {selectors};
  const message = {message};
  let input = null;
  for (const sel of selectors) {{
    input = document.querySelector(sel);
    if (input) break;
  }}
  if (!input) {{
    const active = document.activeElement;
    if (active && (active.tagName === 'TEXTAREA' || active.tagName === 'INPUT' || active.contentEditable === 'true')) {{
      input = active;
    }}
  }}
  if (!input) return false;
  input.focus();
  try {{ document.execCommand('insertText', false, message); }} catch (e) {{}}
  if (input.tagName === 'DIV') {{
    if (!input.innerText.includes(message)) input.innerText = message;
  }} else if (input.value !== message) {{
    input.value = message;
  }}
  input.dispatchEvent(new Event('input', {{ bubbles: true }}));
  input.dispatchEvent(new Event('change', {{ bubbles: true }}));
  setTimeout(() => {{
    for (const sel of {buttons}) {{
      const btn = document.querySelector(sel);
      if (btn && !btn.disabled) {{ btn.click(); return; }}
    }}
    input.dispatchEvent(new KeyboardEvent('keydown', {{ key: 'Enter', code: 'Enter', keyCode: 13, which: 13, bubbles: true, cancelable: true }}));
  }}, 500);
  return true;
}})();"#,
        selectors = json(input_selectors(service)),
        message = json(message),
        buttons = json(SEND_BUTTON_SELECTORS),
    )
}
