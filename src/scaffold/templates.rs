use crate::domain::ProjectConfig;

pub const TSLINT_JSON: &str = r#"{
    "extends": ["tslint:recommended", "tslint-config-prettier"]
}
"#;

pub const TSCONFIG_JSON: &str = r#"{
    "compilerOptions": {
        "target": "es6",
        "module": "commonjs",
        "outDir": "./lib",
        "strict": true
    },
    "include": ["src"],
    "exclude": ["node_modules", "**/__tests__/*"]
}
"#;

pub const JEST_CONFIG: &str = r#"{
    "transform": {
        "^.+\\.(t|j)sx?$": "ts-jest"
    },
    "testRegex": "(/__tests__/.*|(\\.|/)(test|spec))\\.(jsx?|tsx?)$",
    "moduleFileExtensions": ["ts", "tsx", "js", "jsx", "json", "node"]
}
"#;

pub const PRETTIER_RC: &str = r#"{
    "printWidth": 120,
    "trailingComma": "all",
    "singleQuote": true
}
"#;

pub const GITIGNORE: &str = "node_modules/\nlib/\n";

pub const INDEX_TS: &str = r#"import * as core from '@actions/core'

export function greet(name: string) {
    return `Hello ${name}`
}

const nameInput = core.getInput("name")
core.info(greet(nameInput))
"#;

pub const JEST_TEST: &str = r#"import { greet } from '../index'

test('greet', () => {
    expect(greet("Dave")).toBe("Hello Dave")
})
"#;

pub const MOCHA_TEST: &str = r#"import * as assert from 'assert'
import { greet } from '../index'

describe('greet', function () {
    it('should say hello', function () {
        assert.equal(greet("Dave"), "Hello Dave")
    })
})
"#;

pub const CI_WORKFLOW: &str = r#"name: CI

on:
  push:
    branches: [ master, main ]
  pull_request:
    branches: [ master, main ]

jobs:
  build:
    runs-on: ubuntu-latest

    steps:
      - uses: actions/checkout@v2
      - run: npm install
      - run: npm run build
      - run: npm test
      - run: npm run lint
"#;

/// Quote a value as a single-quoted YAML scalar
fn yaml_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn action_yml(config: &ProjectConfig) -> String {
    format!(
        "name: {}
description: {}
inputs:
  name:
    description: 'Your name'
    required: true
runs:
  using: 'node12'
  main: 'dist/index.js'
",
        yaml_quote(&config.name),
        yaml_quote(&config.description)
    )
}

pub fn readme(config: &ProjectConfig) -> String {
    let mut content = format!("# {}\n\n", config.name);

    if config.description.is_empty() {
        content.push_str(
            "This is a starter action produced by [actions-starter](https://github.com/topics/actions-starter).\n",
        );
    } else {
        content.push_str(&config.description);
        content.push('\n');
    }

    if let Some(slug) = config.repository_slug() {
        content.push_str(&format!(
            "
## Usage

To use this action, add the following step to your GitHub Actions workflow:
```
- name: Say hi to Dave
  uses: {}@v{}
  with:
    name: Dave
```
",
            slug, config.initial_version.major
        ));
    }

    content
}
