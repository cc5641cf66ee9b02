//! Roadmap display: domain header, gap analysis and the level timeline

use html_escape::encode_text;

use crate::models::{BookRecommendation, LevelNode, RoadmapData, UserBookAnalysis};
use crate::utils::StringExt;

pub fn render_roadmap(data: &RoadmapData) -> String {
    let stages: String = data
        .roadmap
        .iter()
        .enumerate()
        .map(|(index, level)| render_stage(index, level))
        .collect();

    format!(
        r#"<section class="roadmap">
<div class="overview">
<div class="overview__main">
<span class="pill pill--indigo">领域定位</span>
<h2 class="overview__domain">{domain}</h2>
<p class="overview__summary">{summary}</p>
{gap}</div>
{next_steps}</div>
<div class="timeline">
<div class="timeline__line"></div>
{stages}</div>
</section>
"#,
        domain = encode_text(&data.domain),
        summary = encode_text(&data.summary),
        gap = render_gap_analysis(&data.user_book_analysis),
        next_steps = render_next_steps(&data.user_book_analysis),
    )
}

/// Only rendered when the search was for a specific book
fn render_gap_analysis(analysis: &UserBookAnalysis) -> String {
    let Some(title) = analysis.title.as_deref() else {
        return String::new();
    };

    format!(
        r#"<div class="gap-analysis">
<h3>当前定位与缺口分析</h3>
<p>阅读 <strong>《{title}》</strong> 将你定位在 <span class="gap-analysis__level">{level}</span> 阶段。</p>
<p class="gap-analysis__text">“{gap}”</p>
</div>
"#,
        title = encode_text(title),
        level = analysis.assigned_level.display_name(),
        gap = encode_text(&analysis.gap_analysis),
    )
}

fn render_next_steps(analysis: &UserBookAnalysis) -> String {
    format!(
        r#"<aside class="next-steps">
<h3>下一步建议</h3>
<p>{}</p>
</aside>
"#,
        encode_text(&analysis.next_steps)
    )
}

fn render_stage(index: usize, level: &LevelNode) -> String {
    let side = if index % 2 == 0 { "left" } else { "right" };
    let theme = level.level_name.theme();

    let concepts: String = level
        .key_concepts
        .iter()
        .map(|c| format!(r#"<span class="chip">{}</span>"#, encode_text(c)))
        .collect();
    let books: String = level.books.iter().map(render_book).collect();

    format!(
        r#"<div class="stage stage--{side}" data-level="{level}">
<div class="stage__dot theme--{theme}"></div>
<div class="stage__about">
<span class="badge theme--{theme}">{label}</span>
<h3>核心概念与目标</h3>
<p>{description}</p>
<div class="chips">{concepts}</div>
</div>
<div class="stage__books">
{books}</div>
</div>
"#,
        level = level.level_name.as_str(),
        label = level.level_name.display_name(),
        description = encode_text(&level.description),
    )
}

fn render_book(book: &BookRecommendation) -> String {
    let (class, badge) = if book.is_highlighted() {
        ("book book--current", r#"<span class="book__badge">当前正在阅读</span>"#)
    } else {
        ("book", "")
    };
    let initial = book.title.initial().map(String::from).unwrap_or_default();

    format!(
        r#"<div class="{class}">
{badge}<div class="book__cover">{initial}</div>
<div class="book__body">
<h4>{title}</h4>
<p class="book__author">{author} 著</p>
<p class="book__reason">{reason}</p>
</div>
</div>
"#,
        initial = encode_text(&initial),
        title = encode_text(&book.title),
        author = encode_text(&book.author),
        reason = encode_text(&book.reason),
    )
}
