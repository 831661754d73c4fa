//! Player-facing strings.

use crate::game::Category;

pub const ALREADY_ACTIVE: &str =
    "ゲームはすでに開始されています。新しいゲームを開始するには、現在のゲームを終了してください。";
pub const INIT_FAILED: &str = "ゲームの初期化中にエラーが発生しました。もう一度お試しください。";
pub const GAME_OVER: &str = "ゲームは終了しました。新しいゲームを開始してください。";
pub const REPLY_FAILED: &str = "エラーが発生しました。";
pub const REPLY_MALFORMED: &str = "すみません、指定された形式の返答ができませんでした。";
pub const HINT_FAILED: &str = "エラー: ヒントを生成できませんでした。";

/// The only answers the generator may give to a question.
pub const PERMITTED_REPLIES: [&str; 5] = ["はい", "いいえ", "部分的にそう", "部分的に違う", "わからない"];

/// True when `reply` contains any permitted answer.
pub fn is_permitted_reply(reply: &str) -> bool {
    PERMITTED_REPLIES.iter().any(|permitted| reply.contains(permitted))
}

pub fn announcement(category: Category) -> String {
    format!("ゲームを開始しました。今回のお題は「{}」です。質問をどうぞ！", category.label())
}

pub fn win(answer: &str, topic: &str, percent: u32) -> String {
    format!(
        "正解です！おめでとうございます！\nあなたの回答: 「{answer}」\nお題: 「{topic}」\n類似度: {percent}%"
    )
}

pub fn retry(answer: &str, percent: u32) -> String {
    format!("残念、正解ではありません。\nあなたの回答: 「{answer}」\n類似度: {percent}%\nもう一度挑戦してください！")
}

pub fn forfeit(topic: &str) -> String {
    format!("残念！今回のお題は「{topic}」でした。")
}
