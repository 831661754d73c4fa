//! System prompts sent along with every generator call. Never shown to the player.

use crate::game::texts::PERMITTED_REPLIES;
use crate::game::Category;

pub const TOPIC_REQUEST: &str = "お題を生成してください。";
pub const HINT_REQUEST: &str = "ヒントを生成してください。";

pub fn topic_system(category: Category) -> String {
    format!(
        "あなたは「アキネーター」です。\n\
         以下のカテゴリに基づいて、具体的なお題を1つ生成してください。\n\
         - カテゴリ: {}\n\
         - より多様なお題を生成したいと考えています。\n\
         - ただし、一般人が知っているようなお題を選択してください。\n\
         - 出力形式: [お題の具体的な名前のみ]",
        category.label()
    )
}

pub fn reply_system(topic: &str) -> String {
    let choices = PERMITTED_REPLIES
        .iter()
        .map(|reply| format!("「{reply}」"))
        .collect::<Vec<_>>()
        .join("");
    format!(
        "あなたは「アキネーター」の出題者です。\n\
         お題は「{topic}」です。\n\
         プレイヤーはお題を当てるために質問をします。\n\
         質問には必ず{choices}のいずれかだけで答えてください。\n\
         お題の名前そのものは決して明かさないでください。"
    )
}

pub fn hint_system(topic: &str, level: &str) -> String {
    format!(
        "あなたは「アキネーター」です。\n\
         現在のお題は「{topic}」です。\n\
         ヒントレベル: {level}\n\
         レベルに応じて、以下の内容に従ってヒントを生成してください。\n\
         - 簡単（easy）: 分かりやすい特徴を含む。\n\
         - 普通（medium）: 少し抽象的なヒント。\n\
         - 難しい（hard）: より挑戦的で難しいヒント。\n\
         お題の名前そのものはヒントに含めないでください。"
    )
}
