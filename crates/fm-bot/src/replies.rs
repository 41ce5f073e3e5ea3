//! Canned reply texts in English and Russian.

use fm_protocol::{Dish, Language, Order};
use uuid::Uuid;

/// Help text returned for the conversation start marker.
pub const START_HELP: &str = "Привет! Я принимаю заказы на блины. \
Спросите меню, закажите блин с любимыми начинками, попросите показать заказ \
или оформите его, когда будете готовы.";

/// Reply for labels outside the intent table.
pub const FAULT: &str = "Something went wrong. I can't understand your request";

/// Reply when the classifier call itself failed.
pub fn classifier_failure(detail: &str) -> String {
    format!("Something went wrong while processing your message: {detail}")
}

pub fn not_understood(lang: Language) -> &'static str {
    match lang {
        Language::En => "I can't understand your request",
        Language::Ru => "Я не могу понять ваш запрос",
    }
}

pub fn greeting(lang: Language) -> &'static str {
    match lang {
        Language::En => "Hello, what would you like to order?",
        Language::Ru => "Доброго времени суток, что будете заказывать?",
    }
}

pub fn menu(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "We offer pancakes with different fillings: mustard, ketchup, cheese, caviar, jam, mayo, ham, crab sticks, pineapple"
        }
        Language::Ru => {
            "Мы предлагаем блины с различными начинками: горчица, кетчуп, сыр, икра, варенье, майонез, ветчина, крабовые палочки, ананас, сгущенка"
        }
    }
}

pub fn nothing_ordered(lang: Language) -> &'static str {
    match lang {
        Language::En => "You haven't ordered anything yet :(",
        Language::Ru => "Вы пока ничего не заказали :(",
    }
}

pub fn order_not_understood(lang: Language) -> &'static str {
    match lang {
        Language::En => "You wanted to order something. But I can't understand what :(",
        Language::Ru => "Вы хотели что-то заказать. Но я не понял что :(",
    }
}

/// Current order: a header line and one line per dish, or the empty notice.
pub fn show_order(lang: Language, order: &Order) -> String {
    if order.is_empty() {
        return format!("{}\n", nothing_ordered(lang));
    }
    let header = match lang {
        Language::En => "Your order:",
        Language::Ru => "Ваш заказ:",
    };
    dish_lines(header, order.dishes())
}

/// Confirmation listing only the dishes added by this message.
pub fn ordered(lang: Language, dishes: &[Dish]) -> String {
    let header = match lang {
        Language::En => "You have ordered:",
        Language::Ru => "Вы заказали:",
    };
    dish_lines(header, dishes)
}

pub fn checkout(lang: Language, order_id: Uuid) -> String {
    match lang {
        Language::En => format!(
            "Thanks for your order! One day you will be able to pick it up :). Your order id: {order_id}"
        ),
        Language::Ru => format!(
            "Спасибо за заказ! Однажды вы сможете его забрать :). Идентификатор вашего заказа: {order_id}"
        ),
    }
}

fn dish_lines(header: &str, dishes: &[Dish]) -> String {
    let mut out = format!("{header}\n");
    for dish in dishes {
        out.push_str(&dish.to_string());
        out.push('\n');
    }
    out
}
