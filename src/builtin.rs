pub const BUILTIN_CSS: &str = include_str!("builtin.css");

/// Browser-side theme toggle with the same semantics as `theme::Theme`:
/// localStorage key `mode`, `dark` class on body, chrome meta colors.
pub const THEME_TOGGLE_JS: &str = r##"(function () {
  var storageKey = "mode";
  var metaNames = [
    "theme-color",
    "msapplication-navbutton-color",
    "apple-mobile-web-app-status-bar-style"
  ];
  var body = document.body;
  var footerToggle = document.getElementById("mode-toggler");
  var switchInput = document.querySelector("#mode-toggler-switch input");

  function isDark() {
    return body.classList.contains("dark");
  }

  function apply(dark) {
    body.classList.toggle("dark", dark);
    metaNames.forEach(function (name) {
      var meta = document.querySelector('meta[name="' + name + '"]');
      if (meta) meta.setAttribute("content", dark ? "#000" : "#fff");
    });
    if (footerToggle) {
      footerToggle.textContent = dark ? "Switch to light theme" : "Switch to dark theme";
    }
    if (switchInput) switchInput.checked = dark;
    try {
      localStorage.setItem(storageKey, dark ? "dark" : "light");
    } catch (_) {}
  }

  var saved = null;
  try {
    saved = localStorage.getItem(storageKey);
  } catch (_) {
    saved = null;
  }
  if (saved !== null) apply(saved === "dark");

  if (footerToggle) {
    footerToggle.addEventListener("click", function () {
      apply(!isDark());
    });
  }
  if (switchInput) {
    switchInput.addEventListener("change", function () {
      apply(!isDark());
    });
  }
})();"##;

/// Keeps `#countdown[data-target]` ticking once the page is open.
pub const COUNTDOWN_JS: &str = r#"(function () {
  var el = document.getElementById("countdown");
  if (!el) return;
  var target = Date.parse(el.getAttribute("data-target"));
  if (isNaN(target)) return;

  function pad(n) {
    return String(n).padStart(2, "0");
  }

  var timer = null;
  function update() {
    var distance = target - Date.now();
    if (distance < 0) {
      el.textContent = "ENDED";
      if (timer !== null) clearInterval(timer);
      return;
    }
    var hours = Math.floor(distance / 3600000);
    var minutes = Math.floor((distance % 3600000) / 60000);
    var seconds = Math.floor((distance % 60000) / 1000);
    el.textContent = pad(hours) + ":" + pad(minutes) + ":" + pad(seconds);
  }

  update();
  timer = setInterval(update, 1000);
})();"#;
