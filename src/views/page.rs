//! Page layout: header with the search form, one main panel, footer

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::roadmap::render_roadmap;
use super::{SearchView, ViewState};
use crate::models::{MAX_QUERY_CHARS, SearchMode};

pub fn render_page(view: &SearchView, model_name: &str) -> String {
    let has_result = view.roadmap().is_some();
    let loading = matches!(view.state(), ViewState::Loading);

    let main = match view.state() {
        ViewState::Idle => render_intro(),
        ViewState::Loading => String::new(),
        ViewState::Failed(message) => render_error(message),
        ViewState::Ready(data) => render_roadmap(data),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>这一本，通往何处？</title>
<link rel="stylesheet" href="assets/styles.css">
<script src="assets/app.js" defer></script>
</head>
<body>
<header class="hero{compact}">
{intro}{form}</header>
<main id="main">
<div id="loading" class="loading"{loading_hidden}>
<div class="spinner"></div>
<h3>正在查阅资料库...</h3>
<p>正在为您构建知识结构。</p>
</div>
<div id="content">
{main}</div>
</main>
<footer class="footer">Powered by {model} • 为爱书人打造</footer>
</body>
</html>
"#,
        compact = if has_result { " hero--compact" } else { "" },
        intro = if has_result { String::new() } else { render_hero_title() },
        form = render_form(view.query(), view.mode(), loading),
        loading_hidden = if loading { "" } else { " hidden" },
        model = encode_text(model_name),
    )
}

fn render_hero_title() -> String {
    r#"<h1>这一本，通往何处？</h1>
<p class="hero__lead">一键生成书籍层级定位，发现知识缺口，规划从入门到精通的进阶之路。</p>
"#
    .to_string()
}

fn render_form(query: &str, mode: SearchMode, loading: bool) -> String {
    let placeholder = match mode {
        SearchMode::Book => "例如：思考，快与慢",
        SearchMode::Topic => "例如：行为经济学",
    };
    let disabled = if loading { " disabled" } else { "" };

    format!(
        r#"<form id="search-form" class="search" method="post" action="search">
<input type="text" name="query" value="{value}" placeholder="{placeholder}" maxlength="{max}" required{disabled}>
<button type="submit"{disabled}>生成图谱</button>
<div class="modes">
{book}{topic}</div>
</form>
"#,
        value = encode_double_quoted_attribute(query),
        max = MAX_QUERY_CHARS,
        book = render_mode_option(SearchMode::Book, "分析单本书籍", mode),
        topic = render_mode_option(SearchMode::Topic, "探索特定领域", mode),
    )
}

fn render_mode_option(option: SearchMode, label: &str, selected: SearchMode) -> String {
    let checked = if option == selected { " checked" } else { "" };
    format!(
        r#"<label class="mode"><input type="radio" name="mode" value="{value}"{checked}><span>{label}</span></label>
"#,
        value = option.as_str(),
    )
}

fn render_intro() -> String {
    r#"<section class="intro">
<h3>如何使用</h3>
<div class="cards">
<div class="card"><h4>情境化分析</h4><p>不仅仅是阅读。了解这本书在更广泛的学术或文学领域中所处的位置。</p></div>
<div class="card"><h4>缺口识别</h4><p>找出你遗漏了什么。我们会突出显示你当前书籍可能跳过的关键概念。</p></div>
<div class="card"><h4>进阶指引</h4><p>获得具体的阅读建议，帮助你从当前水平晋升到下一个阶段。</p></div>
</div>
</section>
"#
    .to_string()
}

fn render_error(message: &str) -> String {
    format!(
        r#"<section class="error">
<p class="error__title">分析失败</p>
<p class="error__message">{}</p>
</section>
"#,
        encode_text(message)
    )
}
