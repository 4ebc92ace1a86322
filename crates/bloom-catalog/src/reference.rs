//! Reference option tables for filter inputs and labels.

use serde::Serialize;

/// A selectable filter value with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ReferenceOption {
    ReferenceOption { value, label }
}

/// Common flower types, used for filter checkboxes and search hints.
pub const FLOWER_TYPE_OPTIONS: &[ReferenceOption] = &[
    opt("роза", "Розы"),
    opt("роза кустовая", "Роза кустовая"),
    opt("роза спрей", "Роза спрей"),
    opt("хризантема", "Хризантемы"),
    opt("хризантема кустовая", "Хризантема кустовая"),
    opt("лилия", "Лилии"),
    opt("гвоздика", "Гвоздики"),
    opt("тюльпан", "Тюльпаны"),
    opt("тюльпан грейга", "Тюльпан Greigii"),
    opt("тюльпан кауфмана", "Тюльпан Kaufmanniana"),
    opt("гипсофила", "Гипсофила"),
    opt("ирис", "Ирисы"),
    opt("гортензия", "Гортензия"),
    opt("орхидея", "Орхидеи"),
    opt("альстромерия", "Альстромерии"),
    opt("эустома", "Эустома (лизиантус)"),
    opt("гербера", "Герберы"),
    opt("ромашка", "Ромашки"),
    opt("лаванда", "Лаванда"),
];

/// Palette for the color filter.
pub const COLOR_OPTIONS: &[ReferenceOption] = &[
    opt("white", "Белый"),
    opt("black", "Чёрный"),
    opt("red", "Красный"),
    opt("pink", "Розовый"),
    opt("yellow", "Жёлтый"),
    opt("orange", "Оранжевый"),
    opt("peach", "Персиковый"),
    opt("cream", "Кремовый"),
    opt("purple", "Фиолетовый"),
    opt("lilac", "Лиловый"),
    opt("blue", "Синий"),
    opt("light-blue", "Голубой"),
    opt("green", "Зелёный"),
    opt("mint", "Мятный"),
    opt("burgundy", "Бордовый"),
    opt("coral", "Коралловый"),
    opt("champagne", "Шампань"),
    opt("salmon", "Лососёвый"),
    opt("lavender", "Лавандовый"),
    opt("multicolor", "Микс / разноцветный"),
];

/// Flower count buckets, in select order.
pub const FLOWER_COUNT_OPTIONS: &[ReferenceOption] = &[
    opt("lt11", "до 11 шт"),
    opt("11-31", "от 11 до 31 шт"),
    opt("31-61", "от 31 до 61 шт"),
    opt("61-91", "от 61 до 91 шт"),
    opt("gt91", "более 91 шт"),
];

pub const SORT_OPTIONS: &[ReferenceOption] = &[
    opt("priceAsc", "Сначала дешевые"),
    opt("priceDesc", "Сначала дорогие"),
    opt("ratingDesc", "По рейтингу"),
];

/// Label for `value`, matched case-insensitively.
pub fn label_for(options: &[ReferenceOption], value: &str) -> Option<&'static str> {
    options
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(value) || o.value == value.to_lowercase())
        .map(|o| o.label)
}
