use std::cell::RefCell;
use std::rc::Rc;

use recall_core::prelude::*;
use recall_devtools::Inspector;

/// Line sink shared by the component and the driver; optionally echoes to stdout.
#[derive(Clone, Default)]
pub struct Console {
    lines: Rc<RefCell<Vec<String>>>,
    echo: bool,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn println(&self, line: impl Into<String>) {
        let line = line.into();
        if self.echo {
            println!("{line}");
        }
        self.lines.borrow_mut().push(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

pub struct App {
    pub count: i64,
    pub text: String,
    set_count: SetState<i64>,
    set_text: SetState<String>,
    console: Console,
}

impl Instance for App {
    fn render(&self) {
        self.console.println(format!(
            "current state: {{ count: {}, text: {:?} }}",
            self.count, self.text
        ));
    }
}

impl App {
    pub fn click(&self) {
        self.set_count.set(self.count + 1);
    }

    pub fn plus(&self) {
        self.set_count.update(|c| c + 1);
    }

    pub fn type_word(&self, word: &str) {
        self.set_text.set(word.to_string());
    }
}

pub fn counter(console: &Console) -> impl FnOnce() -> App + '_ {
    move || {
        let (count, set_count) = use_state(1i64);
        let (text, set_text) = use_state("apple".to_string());

        let out = console.clone();
        use_effect(
            move || out.println(format!("effect: count changed {count}")),
            deps![count],
        );

        let out = console.clone();
        let t = text.clone();
        use_effect(
            move || out.println(format!("effect: text changed {t:?}")),
            deps![text.clone()],
        );

        let computed = use_memo(|| count * 2, deps![count]);

        let out = console.clone();
        use_effect(
            move || out.println(format!("effect: computed changed {computed}")),
            deps![computed],
        );

        App {
            count,
            text,
            set_count,
            set_text,
            console: console.clone(),
        }
    }
}

/// Renders the counter, then replays click / type / plus, rendering after each.
pub fn run_script(
    runtime: &mut Runtime,
    inspector: &mut Inspector,
    console: &Console,
) -> Result<App, RenderError> {
    let app = inspector.render(runtime, counter(console))?;

    console.println("=================");
    console.println("event: click");
    app.click();
    let app = inspector.render(runtime, counter(console))?;

    console.println("=================");
    console.println("event: type");
    app.type_word("pear");
    let app = inspector.render(runtime, counter(console))?;

    console.println("=================");
    console.println("event: plus");
    app.plus();
    inspector.render(runtime, counter(console))
}
