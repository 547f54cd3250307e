//! End-to-end rendering assertions over the default grammar.

use pretty_assertions::assert_eq;
use rstest::rstest;

use inkdown_engine::{MediaDef, Options, Processor};

fn html(source: &str) -> String {
    Processor::new().to_html(source).unwrap()
}

#[test]
fn paragraphs_are_separated_by_newlines() {
    assert_eq!(
        html("Hello *world*!\n\nOne more."),
        "<p>Hello <strong>world</strong>!</p>\n<p>One more.</p>"
    );
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(html(""), "");
    assert_eq!(html("\n\n   \n"), "");
}

#[rstest]
#[case("_word_", "<p><em>word</em></p>")]
#[case("*strong*", "<p><strong>strong</strong></p>")]
#[case("~gone~", "<p><s>gone</s></p>")]
#[case("a _b_ *c* ~d~", "<p>a <em>b</em> <strong>c</strong> <s>d</s></p>")]
#[case("_outer *inner*_", "<p><em>outer <strong>inner</strong></em></p>")]
fn emphasis_family(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[test]
fn unterminated_marker_stays_literal() {
    // the underscore is never silently dropped
    assert_eq!(html("_word"), "<p>_word</p>");
    assert_eq!(html("end*"), "<p>end*</p>");
}

#[rstest]
#[case("# one", "<h1>one</h1>")]
#[case("## two", "<h2>two</h2>")]
#[case("###### six", "<h6>six</h6>")]
#[case("####### seven", "<p>####### seven</p>")]
#[case("#nospace", "<p>#nospace</p>")]
fn heading_levels(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[test]
fn heading_selector_decorates_without_rendering() {
    assert_eq!(
        html("# Heading {#top.big}"),
        "<h1 id=\"top\" class=\"big\">Heading</h1>"
    );
}

#[test]
fn paragraph_selector() {
    assert_eq!(html("text {.note}"), "<p class=\"note\">text</p>");
}

#[test]
fn terse_list() {
    assert_eq!(
        html("* a\n* b\n* c"),
        "<ul><li>a</li><li>b</li><li>c</li></ul>"
    );
}

#[test]
fn blank_line_forces_block_mode_for_the_whole_list() {
    assert_eq!(
        html("* a\n\n* b"),
        "<ul><li><p>a</p></li><li><p>b</p></li></ul>"
    );
}

#[test]
fn list_item_continuation_lines_stay_in_the_item() {
    assert_eq!(
        html("* first line\n  wrapped"),
        "<ul><li>first line\n  wrapped</li></ul>"
    );
}

#[test]
fn nested_list_inside_block_item() {
    assert_eq!(
        html("* a\n\n  * b"),
        "<ul><li><p>a</p><ul><li>b</li></ul></li></ul>"
    );
}

#[test]
fn dash_bullets_work_too() {
    assert_eq!(html("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn numbered_list_accepts_variable_width_markers() {
    assert_eq!(
        html("9. nine\n10. ten"),
        "<ol><li>nine</li><li>ten</li></ol>"
    );
}

#[test]
fn list_selector_decorates_the_list_element() {
    assert_eq!(
        html("* a {#menu.wide}\n* b"),
        "<ul id=\"menu\" class=\"wide\"><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn code_fence_renders_escaped_content() {
    assert_eq!(
        html("```\na < b && c\n```"),
        "<pre><code>a &lt; b &amp;&amp; c\n</code></pre>"
    );
}

#[test]
fn code_fence_info_string_is_discarded() {
    assert_eq!(
        html("```rust\nlet x = 1;\n```"),
        "<pre><code>let x = 1;\n</code></pre>"
    );
}

#[test]
fn unterminated_fence_falls_through_to_paragraph() {
    let out = html("```\ncode");
    assert!(out.starts_with("<p>"), "got: {out}");
    assert!(out.contains("code"));
}

#[test]
fn div_fence_reparses_content_as_blocks() {
    assert_eq!(
        html("~~~\ninner\n~~~"),
        "<div><p>inner</p></div>"
    );
}

#[test]
fn div_fence_with_selector_and_nested_list() {
    assert_eq!(
        html("~~~ {.note}\n* a\n* b\n~~~"),
        "<div class=\"note\"><ul><li>a</li><li>b</li></ul></div>"
    );
}

#[test]
fn html_block_is_emitted_verbatim() {
    let source = "<div>\n  <span>x & y</span>\n</div>";
    assert_eq!(html(source), source);
}

#[test]
fn inline_html_and_comments_pass_through() {
    assert_eq!(html("a <b>bold</b> c"), "<p>a <b>bold</b> c</p>");
    assert_eq!(html("x <!-- note --> y"), "<p>x <!-- note --> y</p>");
}

#[test]
fn stray_angle_brackets_are_escaped() {
    assert_eq!(html("1 < 2"), "<p>1 &lt; 2</p>");
}

#[test]
fn entity_escaping_is_idempotent() {
    assert_eq!(
        html("&amp; & &#169; &#x2764;"),
        "<p>&amp; &amp; &#169; &#x2764;</p>"
    );
}

#[test]
fn backslash_escapes_suppress_markup() {
    assert_eq!(html(r"\*not strong\*"), "<p>*not strong*</p>");
    assert_eq!(html(r"\_plain\_"), "<p>_plain_</p>");
}

#[test]
fn code_span_escapes_html_and_honors_backslashes() {
    assert_eq!(html("`a<b`"), "<p><code>a&lt;b</code></p>");
    assert_eq!(html("`a\\`b`"), "<p><code>a`b</code></p>");
}

#[rstest]
#[case("$$a<b$$", "<p><span class=\"formula\">$$a&lt;b$$</span></p>")]
#[case("%%x%%", "<p><span class=\"formula\">%%x%%</span></p>")]
#[case(r"$$\frac{1}{2}$$", "<p><span class=\"formula\">$$\\frac{1}{2}$$</span></p>")]
fn formulas_keep_delimiters_and_backslashes(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[test]
fn inline_link_resolves_at_parse_time() {
    assert_eq!(
        html("[text](/url)"),
        "<p><a href=\"/url\">text</a></p>"
    );
}

#[test]
fn external_links_get_target_blank_when_enabled() {
    let processor = Processor::with_options(Options::new().with_external_links(true));
    assert_eq!(
        processor.to_html("[x](https://e.com) [y](/local)").unwrap(),
        "<p><a href=\"https://e.com\" target=\"_blank\">x</a> <a href=\"/local\">y</a></p>"
    );
    // off by default
    assert_eq!(
        html("[x](https://e.com)"),
        "<p><a href=\"https://e.com\">x</a></p>"
    );
}

#[test]
fn reference_link_with_nested_media_in_text() {
    let processor = Processor::new();
    let mut doc = processor.parse("[see ![p][m] now][id]").unwrap();
    assert_eq!(doc.media_ids(), ["id".to_owned(), "m".to_owned()]);
    doc.resolve("id", MediaDef::new("/id"));
    doc.resolve("m", MediaDef::new("/m.png"));
    assert_eq!(
        doc.render(),
        "<p><a href=\"/id\">see <img src=\"/m.png\" alt=\"p\"> now</a></p>"
    );
}

#[test]
fn unresolved_media_renders_empty() {
    assert_eq!(html("![a][nope]"), "<p></p>");
}

#[test]
fn inline_media() {
    assert_eq!(
        html("![alt text](/img.png)"),
        "<p><img src=\"/img.png\" alt=\"alt text\"></p>"
    );
}

#[test]
fn bracketed_prose_is_not_a_headless_link() {
    assert_eq!(html("[not a ref]"), "<p>[not a ref]</p>");
}

#[test]
fn source_indices_emit_byte_offsets() {
    let processor = Processor::with_options(Options::new().with_source_indices(true));
    assert_eq!(
        processor.to_html("# H\n\npara").unwrap(),
        "<h1 data-src=\"0-3\">H</h1>\n<p data-src=\"5-9\">para</p>"
    );
}

#[test]
fn typographic_quotes_substitute_when_configured() {
    let processor = Processor::with_options(Options::new().with_quotes("‘", "’", "“", "”"));
    assert_eq!(
        processor.to_html("\"Hi\" it's fine").unwrap(),
        "<p>“Hi” it’s fine</p>"
    );
    // quotes inside code spans stay straight
    assert_eq!(
        processor.to_html("`'raw'`").unwrap(),
        "<p><code>'raw'</code></p>"
    );
}

#[test]
fn invalid_xml_chars_are_stripped_when_enabled() {
    let processor =
        Processor::with_options(Options::new().with_strip_invalid_xml_chars(true));
    assert_eq!(processor.to_html("a\u{0}b\u{B}c").unwrap(), "<p>abc</p>");
}

#[test]
fn composite_document_snapshot() {
    let source = "# Title {#main}\n\nIntro with _em_ and `code`.\n\n* one\n* two\n\n```rust\nlet x = 1;\n```";
    insta::assert_snapshot!("composite_document", html(source));
}
