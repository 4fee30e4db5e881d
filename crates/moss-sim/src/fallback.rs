//! Built-in message pools used when no generated pool is available.
//!
//! The generic pool answers every category. Personality pools only
//! override the categories where temperament shows, and each one always
//! carries the four coaxing categories.

use std::sync::LazyLock;

use moss_types::{Category, MessagePool, Personality};

type Table = &'static [(Category, &'static [&'static str])];

const GENERIC: Table = &[
    (Category::FeedSuccess, &[
        "*munch munch* that hit the spot!",
        "*happily nibbles* thank you!",
        "*chomps contentedly*",
    ]),
    (Category::FeedFull, &[
        "*pushes the food away* too... full...",
        "*belly bulges* no more, please",
        "*groans softly* I couldn't possibly",
    ]),
    (Category::FeedHungry, &[
        "*devours it instantly* FINALLY!",
        "*gobbles everything* I was starving!",
        "*inhales the snack* more, more!",
    ]),
    (Category::FeedSleeping, &[
        "*snores* ...mmm... food... later...",
        "*sleepily ignores the snack*",
    ]),
    (Category::FeedTun, &[
        "*a tiny shudder runs through the dried-up ball*",
        "*absorbs a little moisture*",
    ]),
    (Category::FeedCooldown, &[
        "*still chewing the last bite*",
        "give me a moment to digest!",
    ]),
    (Category::PlaySuccess, &[
        "*rolls around happily*",
        "*chases its own tail-end* wheee!",
        "that was fun!",
    ]),
    (Category::PlayTired, &[
        "*plays half-heartedly* ...so tired...",
        "*flops over after one round*",
    ]),
    (Category::PlayHappy, &[
        "*bounces with pure joy* AGAIN!",
        "*wiggles all eight legs in delight*",
    ]),
    (Category::PlaySleeping, &[
        "*zzz* ...not now... dreaming...",
        "*rolls over and keeps sleeping*",
    ]),
    (Category::PlayTun, &["*the curled-up ball does not respond*"]),
    (Category::PlayCooldown, &[
        "*still catching its breath*",
        "one sec, I'm pooped!",
    ]),
    (Category::PetSuccess, &[
        "*leans into your touch*",
        "*purrs in a very un-tardigrade way*",
        "*happy wiggle*",
    ]),
    (Category::PetMaxBond, &[
        "*melts completely* you're my favorite",
        "*clings to your finger and won't let go*",
    ]),
    (Category::PetLowMood, &[
        "*sniffles* ...thanks, I needed that",
        "*weakly nuzzles your hand*",
    ]),
    (Category::PetSleeping, &[
        "*smiles in its sleep*",
        "*snuggles closer while dreaming*",
    ]),
    (Category::PetTun, &["*the dried-up ball twitches ever so slightly*"]),
    (Category::PetCooldown, &[
        "*still tingly from the last pat*",
        "easy there, one pat at a time!",
    ]),
    (Category::Reviving, &[
        "*uncurls slowly* ...I'm... back?",
        "*rehydrates and blinks* what did I miss?",
    ]),
    (Category::IdleHappy, &[
        "*hums a little tune*",
        "life is good in the moss!",
        "*does a happy shimmy*",
    ]),
    (Category::IdleNeutral, &[
        "*looks around curiously*",
        "*waddles in a small circle*",
        "hmm...",
    ]),
    (Category::IdleHungry, &[
        "*stomach growls*",
        "is it snack time yet?",
    ]),
    (Category::IdleSad, &[
        "*sighs quietly*",
        "*stares at the ground*",
    ]),
    (Category::IdleLonely, &[
        "*looks around for you*",
        "hello? anyone there?",
    ]),
    (Category::IdleCritical, &[
        "*trembles weakly*",
        "I don't feel so good...",
    ]),
    (Category::IdleTun, &[
        "*curled up into a dry little barrel*",
        "...",
    ]),
    (Category::IdleSleeping, &[
        "*zzz*",
        "*snores softly*",
        "*mumbles in its sleep*",
    ]),
    (Category::NeedsFood, &[
        "*tummy rumbles* got any snacks?",
        "I could really eat something...",
    ]),
    (Category::NeedsPlay, &[
        "I'm bored... play with me?",
        "*nudges a tiny ball toward you*",
    ]),
    (Category::NeedsAffection, &[
        "*looks up at you expectantly*",
        "could I get a pat?",
    ]),
    (Category::NeedsCritical, &[
        "*wobbles* I really need some care...",
        "please help... I'm fading...",
    ]),
];

const CHEERFUL: Table = &[
    (Category::FeedSuccess, &["YUM! you're the best chef ever!", "*sparkles* delicious!"]),
    (Category::PlaySuccess, &["best. game. EVER!", "*giggles uncontrollably*"]),
    (Category::PetSuccess, &["*beams* I love you too!", "*glows with happiness*"]),
    (Category::IdleHappy, &["what a wonderful day!", "*sings to the moss*"]),
    (Category::IdleNeutral, &["*smiles at nothing in particular*"]),
    (Category::NeedsFood, &["snack break? pretty please?", "my tummy says hi!"]),
    (Category::NeedsPlay, &["let's play a game! any game!", "*bounces expectantly*"]),
    (Category::NeedsAffection, &["hug time? hug time!", "*opens tiny arms wide*"]),
    (Category::NeedsCritical, &["I'm not feeling great... but I know you'll help!"]),
];

const DRAMATIC: Table = &[
    (Category::FeedSuccess, &["*gasps* you REMEMBERED me!", "finally, sustenance!"]),
    (Category::FeedHungry, &["I was WASTING AWAY!", "*collapses onto the food*"]),
    (Category::PlaySuccess, &["a performance for the ages!", "*takes a bow*"]),
    (Category::PetSuccess, &["*swoons* at last, affection!"]),
    (Category::IdleLonely, &["*stares out the window* they've forgotten me..."]),
    (Category::IdleSad, &["*drapes itself over a leaf* woe is me"]),
    (Category::NeedsFood, &["I am STARVING. Literally perishing.", "*faints theatrically*"]),
    (Category::NeedsPlay, &["the boredom... it's UNBEARABLE!", "entertain me or I shall wither!"]),
    (Category::NeedsAffection, &["does ANYONE even care about me?!", "*sobs dramatically*"]),
    (Category::NeedsCritical, &["this is the end... tell my story...", "*clutches chest* the light fades..."]),
];

const SASSY: Table = &[
    (Category::FeedSuccess, &["took you long enough.", "*eats* ...it's fine, I guess"]),
    (Category::FeedCooldown, &["I'm not a bottomless pit, you know"]),
    (Category::PlaySuccess, &["okay, that was... acceptable", "*tries not to smile*"]),
    (Category::PetSuccess, &["don't get used to this.", "*allows it, grudgingly*"]),
    (Category::IdleNeutral, &["*rolls all eight eyes*", "whatever."]),
    (Category::IdleLonely, &["oh, NOW you show up?"]),
    (Category::NeedsFood, &["um, hello? food? remember that?", "*taps empty bowl pointedly*"]),
    (Category::NeedsPlay, &["I'm bored. fix it.", "wow, so much fun here. not."]),
    (Category::NeedsAffection, &["I guess you could pet me. if you want. whatever."]),
    (Category::NeedsCritical, &["okay this is actually bad. help."]),
];

const SHY: Table = &[
    (Category::FeedSuccess, &["*nibbles quietly* ...thank you", "*small happy squeak*"]),
    (Category::PlaySuccess, &["*peeks out* ...that was nice", "*tiny wiggle*"]),
    (Category::PetSuccess, &["*blushes and hides*", "*leans in, just a little*"]),
    (Category::IdleNeutral, &["*hides behind a moss frond*"]),
    (Category::IdleLonely, &["*peeks out hopefully*"]),
    (Category::NeedsFood, &["*glances at the food, then at you*", "...um, maybe a snack?"]),
    (Category::NeedsPlay, &["*nudges a pebble toward you, then hides*"]),
    (Category::NeedsAffection, &["...could you... maybe...", "*inches closer*"]),
    (Category::NeedsCritical, &["*whimpers softly* ...help?"]),
];

const STOIC: Table = &[
    (Category::FeedSuccess, &["Adequate.", "*nods in approval*"]),
    (Category::PlaySuccess, &["A worthy diversion.", "*allows itself a small smile*"]),
    (Category::PetSuccess, &["*accepts the gesture with dignity*"]),
    (Category::IdleNeutral, &["*contemplates the moss*", "All is as it should be."]),
    (Category::IdleHappy, &["Contentment."]),
    (Category::NeedsFood, &["Nourishment would be appropriate.", "*glances at the pantry*"]),
    (Category::NeedsPlay, &["Some activity would be welcome."]),
    (Category::NeedsAffection, &["Your company is requested."]),
    (Category::NeedsCritical, &["My condition is... concerning."]),
];

fn build(table: Table) -> MessagePool {
    table
        .iter()
        .map(|(category, lines)| {
            let owned = lines.iter().map(|line| (*line).to_owned()).collect();
            (*category, owned)
        })
        .collect()
}

static GENERIC_POOL: LazyLock<MessagePool> = LazyLock::new(|| build(GENERIC));
static CHEERFUL_POOL: LazyLock<MessagePool> = LazyLock::new(|| build(CHEERFUL));
static DRAMATIC_POOL: LazyLock<MessagePool> = LazyLock::new(|| build(DRAMATIC));
static SASSY_POOL: LazyLock<MessagePool> = LazyLock::new(|| build(SASSY));
static SHY_POOL: LazyLock<MessagePool> = LazyLock::new(|| build(SHY));
static STOIC_POOL: LazyLock<MessagePool> = LazyLock::new(|| build(STOIC));

/// The generic pool. Covers every category.
pub fn generic_pool() -> &'static MessagePool {
    &GENERIC_POOL
}

/// The static pool for a personality.
pub fn personality_pool(personality: Personality) -> &'static MessagePool {
    match personality {
        Personality::Cheerful => &CHEERFUL_POOL,
        Personality::Dramatic => &DRAMATIC_POOL,
        Personality::Sassy => &SASSY_POOL,
        Personality::Shy => &SHY_POOL,
        Personality::Stoic => &STOIC_POOL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_pool_is_complete() {
        let pool = generic_pool();
        for category in Category::ALL {
            assert!(pool.get(category).is_some(), "generic pool lacks {category}");
        }
    }

    #[test]
    fn every_personality_covers_all_needs() {
        for personality in Personality::ALL {
            let pool = personality_pool(personality);
            for category in Category::NEEDS {
                assert!(pool.get(category).is_some(), "{personality} lacks {category}");
            }
        }
    }

    #[test]
    fn no_blank_lines() {
        for pool in Personality::ALL
            .into_iter()
            .map(personality_pool)
            .chain(std::iter::once(generic_pool()))
        {
            for lines in pool.0.values() {
                assert!(lines.iter().all(|line| !line.trim().is_empty()));
            }
        }
    }
}
