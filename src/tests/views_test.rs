use crate::models::{DifficultyLevel, SearchMode};
use crate::services::RoadmapError;
use crate::services::roadmap::parse_roadmap;
use crate::tests::common::{BOOK_QUERY, TOPIC_QUERY, sample_roadmap, topic_roadmap_json};
use crate::views::{SearchView, ViewState, render_page, render_roadmap};

const MODEL: &str = "gemini-2.5-flash";

mod roadmap_tests {
    use super::*;

    #[test]
    fn test_gap_analysis_rendered_for_book_search() {
        let html = render_roadmap(&sample_roadmap());

        assert!(html.contains("当前定位与缺口分析"));
        assert!(html.contains(&format!("《{}》", BOOK_QUERY)));
        assert!(html.contains("进阶 / 实践者"));
        assert!(html.contains("下一步建议"));
    }

    #[test]
    fn test_gap_analysis_suppressed_for_topic_search() {
        let data = parse_roadmap(&topic_roadmap_json(), SearchMode::Topic).unwrap();
        let html = render_roadmap(&data);

        assert!(!html.contains("当前定位与缺口分析"));
        assert!(!html.contains("《None》"));
        // Next steps stay visible without a book
        assert!(html.contains("下一步建议"));
    }

    #[test]
    fn test_only_current_book_is_highlighted() {
        let html = render_roadmap(&sample_roadmap());

        assert_eq!(html.matches("book book--current").count(), 1);
        assert_eq!(html.matches("当前正在阅读").count(), 1);

        let current = html.find("book book--current").unwrap();
        let title = html.find("<h4>思考，快与慢</h4>").unwrap();
        assert!(current < title);
    }

    #[test]
    fn test_stages_alternate_sides_in_level_order() {
        let html = render_roadmap(&sample_roadmap());

        let positions: Vec<usize> = DifficultyLevel::ALL
            .iter()
            .map(|l| html.find(&format!(r#"data-level="{}""#, l.as_str())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(html.matches("stage stage--left").count(), 2);
        assert_eq!(html.matches("stage stage--right").count(), 1);
        assert!(html.contains("theme--emerald"));
        assert!(html.contains("theme--purple"));
    }

    #[test]
    fn test_renders_concepts_and_authors() {
        let html = render_roadmap(&sample_roadmap());

        assert!(html.contains(r#"<span class="chip">锚定效应</span>"#));
        assert!(html.contains("丹尼尔·卡尼曼 著"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let mut data = sample_roadmap();
        data.domain = "<script>alert(1)</script>".to_string();
        data.roadmap[0].books[0].reason = "a & b".to_string();

        let html = render_roadmap(&data);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let data = sample_roadmap();
        assert_eq!(render_roadmap(&data), render_roadmap(&data));
    }
}

mod page_tests {
    use super::*;

    #[test]
    fn test_idle_page_shows_intro() {
        let html = render_page(&SearchView::new(), MODEL);

        assert!(html.contains("<h1>这一本，通往何处？</h1>"));
        assert!(html.contains("如何使用"));
        assert!(html.contains(r#"class="loading" hidden"#));
        assert!(html.contains("Powered by gemini-2.5-flash"));
        assert!(html.contains(r#"value="book" checked"#));
    }

    #[test]
    fn test_result_page_compacts_header() {
        let mut view = SearchView::new();
        let ticket = view.begin(BOOK_QUERY, SearchMode::Book);
        view.resolve(ticket, Ok(sample_roadmap()));

        let html = render_page(&view, MODEL);

        assert!(html.contains("hero hero--compact"));
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("如何使用"));
        assert!(html.contains(&format!(r#"value="{}""#, BOOK_QUERY)));
    }

    #[test]
    fn test_loading_page_disables_form() {
        let mut view = SearchView::new();
        view.begin(TOPIC_QUERY, SearchMode::Topic);

        let html = render_page(&view, MODEL);

        assert!(html.contains(r#"<div id="loading" class="loading">"#));
        assert!(html.contains("<button type=\"submit\" disabled>"));
        assert!(html.contains(r#"value="topic" checked"#));
        assert!(html.contains("例如：行为经济学"));
    }

    #[test]
    fn test_error_page_shows_message() {
        let mut view = SearchView::new();
        let ticket = view.begin(BOOK_QUERY, SearchMode::Book);
        view.resolve(ticket, Err(RoadmapError::EmptyResponse));

        let html = render_page(&view, MODEL);

        assert!(html.contains("分析失败"));
        assert!(html.contains("未能生成学习路线图，请稍后再试。"));
        assert!(!html.contains("timeline"));
    }

    #[test]
    fn test_query_attribute_is_escaped() {
        let mut view = SearchView::new();
        view.fail(r#""><b>x"#, SearchMode::Book, "bad");

        let html = render_page(&view, MODEL);

        assert!(!html.contains(r#""><b>x"#));
    }
}

mod search_view_tests {
    use super::*;

    #[test]
    fn test_begin_clears_previous_result() {
        let mut view = SearchView::new();
        let first = view.begin(BOOK_QUERY, SearchMode::Book);
        assert!(view.resolve(first, Ok(sample_roadmap())));
        assert!(view.roadmap().is_some());

        view.begin(TOPIC_QUERY, SearchMode::Topic);

        assert_eq!(view.state(), &ViewState::Loading);
        assert!(view.roadmap().is_none());
        assert_eq!(view.query(), TOPIC_QUERY);
        assert_eq!(view.mode(), SearchMode::Topic);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut view = SearchView::new();
        let stale = view.begin(BOOK_QUERY, SearchMode::Book);
        let latest = view.begin(TOPIC_QUERY, SearchMode::Topic);

        assert!(!view.resolve(stale, Ok(sample_roadmap())));
        assert_eq!(view.state(), &ViewState::Loading);

        assert!(view.resolve(latest, Err(RoadmapError::Timeout(120))));
        assert!(matches!(view.state(), ViewState::Failed(_)));
    }

    #[test]
    fn test_error_leaves_no_roadmap() {
        let mut view = SearchView::new();
        let ok = view.begin(BOOK_QUERY, SearchMode::Book);
        view.resolve(ok, Ok(sample_roadmap()));

        let failing = view.begin(BOOK_QUERY, SearchMode::Book);
        view.resolve(failing, Err(RoadmapError::SchemaMismatch("missing".to_string())));

        assert!(view.roadmap().is_none());
        assert_eq!(
            view.state(),
            &ViewState::Failed("AI 返回的数据格式无效，请稍后再试。".to_string())
        );
    }

    #[test]
    fn test_fail_invalidates_outstanding_ticket() {
        let mut view = SearchView::new();
        let ticket = view.begin(BOOK_QUERY, SearchMode::Book);
        view.fail("", SearchMode::Book, "请输入要分析的书名或主题。");

        assert!(!view.resolve(ticket, Ok(sample_roadmap())));
        assert!(view.roadmap().is_none());
    }
}
