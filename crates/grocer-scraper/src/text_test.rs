use serde_json::json;

use super::*;

// ---------------------------------------------------------------------------
// strip_tags
// ---------------------------------------------------------------------------

#[test]
fn strip_tags_turns_list_items_into_lines() {
    let html = "<ul><li>Fresh</li><li>Organic</li></ul>";
    assert_eq!(strip_tags(html), "\nFresh\nOrganic");
}

#[test]
fn strip_tags_removes_tags_with_attributes() {
    let html = r#"<p class="copy">Ripe <b>yellow</b> bananas<br/></p>"#;
    assert_eq!(strip_tags(html), "Ripe yellow bananas");
}

#[test]
fn strip_tags_decodes_common_entities() {
    assert_eq!(strip_tags("Salt &amp; Pepper&nbsp;Chips"), "Salt & Pepper Chips");
    assert_eq!(strip_tags("&quot;Best&quot; &lt;3"), "\"Best\" <3");
    assert_eq!(strip_tags("&amp;lt;"), "&lt;");
}

#[test]
fn strip_tags_leaves_plain_text_alone() {
    assert_eq!(strip_tags("5 < 6 and 7 > 3"), "5 < 6 and 7 > 3");
}

// ---------------------------------------------------------------------------
// humanize_key
// ---------------------------------------------------------------------------

#[test]
fn humanize_key_splits_camel_case() {
    assert_eq!(humanize_key("shortDescription"), "Short Description");
    assert_eq!(humanize_key("productType"), "Product Type");
    assert_eq!(humanize_key("storageType"), "Storage Type");
    assert_eq!(humanize_key("brand"), "Brand");
}

#[test]
fn humanize_key_keeps_upper_case_runs_together() {
    assert_eq!(humanize_key("HTMLTitle"), "Html Title");
    assert_eq!(humanize_key("servingSizeUS"), "Serving Size Us");
}

#[test]
fn humanize_key_treats_non_letters_as_separators() {
    assert_eq!(humanize_key("net_weight"), "Net Weight");
    assert_eq!(humanize_key(""), "");
}

// ---------------------------------------------------------------------------
// format_details
// ---------------------------------------------------------------------------

#[test]
fn format_details_keeps_allow_listed_keys_in_fixed_order() {
    let detailed = json!({
        "ingredients": "Bananas.",
        "productCode": "4011",
        "brand": "Fresh Produce",
        "assembledProductWeight": "1 lb"
    });
    let map = detailed.as_object().unwrap();
    assert_eq!(
        format_details(map),
        "Brand:\n\tFresh Produce\n\nIngredients:\n\tBananas.\n\n"
    );
}

#[test]
fn format_details_indents_continuation_lines() {
    let detailed = json!({"description": "<ul><li>Sweet</li><li>Ripe</li></ul>"});
    let map = detailed.as_object().unwrap();
    assert_eq!(format_details(map), "Description:\n\t\n\tSweet\n\tRipe\n\n");
}

#[test]
fn format_details_skips_non_string_values() {
    let detailed = json!({"brand": null, "productType": 12});
    let map = detailed.as_object().unwrap();
    assert_eq!(format_details(map), "");
}

// ---------------------------------------------------------------------------
// image_extension
// ---------------------------------------------------------------------------

#[test]
fn image_extension_ignores_query_string() {
    assert_eq!(
        image_extension("https://i5.walmartimages.com/asr/abc.jpeg?odnHeight=450&odnWidth=450"),
        "jpeg"
    );
}

#[test]
fn image_extension_without_query() {
    assert_eq!(image_extension("https://cdn.example.com/img/44390948.PNG"), "png");
}

#[test]
fn image_extension_defaults_to_jpg() {
    assert_eq!(image_extension("https://cdn.example.com/img/44390948"), "jpg");
    assert_eq!(image_extension("https://cdn.example.com/img/.hidden"), "jpg");
    assert_eq!(image_extension("https://cdn.example.com/a.b/c?x=1"), "jpg");
}
