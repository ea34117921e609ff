//! The demo screens.

use std::sync::LazyLock;

use oxide_form_state::validation::{RangeValidator, RegexValidator, RequiredValidator};
use oxide_form_state::{ErrorMap, FormValues, Result, Rules, Validate};
use oxide_forms::fields::{
    checkbox_control, checkbox_group_control, number_control, radio_group_control,
    select_control, text_control, textarea_control,
};
use oxide_forms::messages::{REQUIRED_INPUT, REQUIRED_SELECT};
use oxide_forms::{FormBuilder, FormLayout, FormScreen};

const PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県", "茨城県", "栃木県",
    "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県", "新潟県", "富山県", "石川県", "福井県",
    "山梨県", "長野県", "岐阜県", "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府",
    "兵庫県", "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県", "徳島県",
    "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県",
    "鹿児島県", "沖縄県",
];

/// Name and free-form comments. Always valid.
#[derive(Debug, Clone, Copy)]
pub struct ProfileScreen;

impl FormScreen for ProfileScreen {
    fn layout() -> Result<FormLayout> {
        FormBuilder::new()
            .control(text_control("firstName", "名", false))
            .control(textarea_control("otherComments", "その他", 3, false))
            .submit_label("SAVE")
            .build()
    }
}

static ADDRESS_RULES: LazyLock<Rules> = LazyLock::new(|| {
    Rules::new()
        .rule("prefecture", RequiredValidator::with_message(REQUIRED_SELECT))
        .rule("city", RequiredValidator::with_message(REQUIRED_INPUT))
        .rule(
            "postalCode",
            RegexValidator::new(r"^\d{3}-?\d{4}$", "郵便番号は123-4567の形式で入力してください")
                .expect("postal code pattern compiles"),
        )
        .rule(
            "age",
            RangeValidator::with_message(Some(0.0), Some(150.0), "0から150の間で入力してください")
                .number_message("数値を入力してください"),
        )
});

/// Postal address with a few extra preference controls.
#[derive(Debug, Clone, Copy)]
pub struct AddressScreen;

impl FormScreen for AddressScreen {
    fn layout() -> Result<FormLayout> {
        let prefectures: Vec<(&str, &str)> = PREFECTURES.iter().map(|p| (*p, *p)).collect();
        FormBuilder::new()
            .control(select_control("prefecture", "都道府県", &prefectures, true))
            .control(text_control("city", "市区町村", true))
            .control(text_control("postalCode", "郵便番号", false).help_text("123-4567"))
            .control(number_control("age", "年齢", false))
            .control(textarea_control("notes", "備考", 2, false))
            .control(checkbox_control("agree", "規約", "規約に同意する"))
            .control(checkbox_group_control(
                "interests",
                "興味のある分野",
                &[("news", "ニュース"), ("events", "イベント"), ("offers", "キャンペーン")],
                false,
            ))
            .control(radio_group_control(
                "contact",
                "連絡方法",
                &[("email", "メール"), ("phone", "電話"), ("none", "不要")],
                false,
            ))
            .submit_label("SAVE")
            .build()
    }

    fn validate(values: &FormValues) -> ErrorMap {
        ADDRESS_RULES.validate(values)
    }
}
